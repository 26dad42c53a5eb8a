use std::{collections::HashSet, sync::Arc, thread, time::Duration};
use stm_core::{
    generator::HexTokenGenerator,
    pool::{TokenManager, TokenPool, TokenPoolConfig, ValidationMode},
};
use stm_test::test;

#[test]
fn concurrent_callers_keep_the_ring_consistent() {
    const CAPACITY: usize = 7;
    const THREADS: usize = 8;
    const ROUNDS: usize = 500;

    let pool = Arc::new(TokenPool::new(CAPACITY, 3, Duration::from_secs(60)).unwrap());

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let pool = pool.clone();
            thread::spawn(move || {
                let mut accepted = 0;
                for _ in 0..ROUNDS {
                    let token = pool.issue();
                    assert!(!token.is_empty());
                    if pool.validate(&token) {
                        accepted += 1;
                    }
                    let snapshot = pool.snapshot();
                    assert!(snapshot.cursor < CAPACITY);
                    assert_eq!(snapshot.slots.len(), CAPACITY);
                }
                accepted
            })
        })
        .collect();

    let accepted: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
    log::info!("accepted {accepted} of {} validations", THREADS * ROUNDS);

    let snapshot = pool.snapshot();
    assert_eq!(snapshot.cursor, (THREADS * ROUNDS) % CAPACITY);
    let values: HashSet<_> = snapshot.slots.iter().map(|s| s.value().to_owned()).collect();
    assert_eq!(values.len(), CAPACITY);
    for slot in &snapshot.slots {
        assert!(slot.use_count() >= 1);
        assert!(slot.expires_at().is_some());
    }
}

#[test]
fn tokens_stay_valid_while_cycling_the_ring() {
    let pool = TokenPool::with_generator(5, 0, Duration::ZERO, HexTokenGenerator::new()).unwrap();

    let first_round: Vec<_> = (0..5).map(|_| pool.issue()).collect();
    assert_eq!(first_round.iter().collect::<HashSet<_>>().len(), 5);
    for token in &first_round {
        assert!(pool.validate(token));
    }

    let second_round: Vec<_> = (0..5).map(|_| pool.issue()).collect();
    assert_eq!(first_round, second_round);
}

#[test]
fn shared_manager_as_trait_object() {
    let manager: Arc<dyn TokenManager> = Arc::new(TokenPool::new(2, 1, Duration::from_secs(60)).unwrap());
    let shared = manager.clone();

    let token = shared.issue();
    assert!(manager.validate(&token));
    assert!(!manager.validate("unknown"));
}

#[test]
fn config_from_json() {
    let config: TokenPoolConfig = serde_json::from_str(
        r#"{
            "capacity": 10,
            "maxUses": 15,
            "ttlSeconds": 60,
            "validation": "strict"
        }"#,
    )
    .unwrap();
    assert_eq!(config.capacity, 10);
    assert_eq!(config.max_uses, 15);
    assert_eq!(config.ttl(), Duration::from_secs(60));
    assert_eq!(config.validation, ValidationMode::Strict);

    let pool = TokenPool::from_config(&config).unwrap();
    assert_eq!(pool.capacity(), 10);
}

#[test]
fn config_defaults_to_a_single_unlimited_token() {
    let config: TokenPoolConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, TokenPoolConfig::default());

    let pool = TokenPool::from_config(&config).unwrap();
    assert_eq!(pool.capacity(), 1);
    assert_eq!(pool.max_uses(), None);
    assert_eq!(pool.ttl(), None);
    assert_eq!(pool.validation(), ValidationMode::Lenient);

    let token = pool.issue();
    assert_eq!(pool.issue(), token);
}

#[test]
fn config_with_zero_capacity_is_rejected() {
    let config = TokenPoolConfig {
        capacity: 0,
        ..Default::default()
    };
    assert!(TokenPool::from_config(&config).is_err());
}
