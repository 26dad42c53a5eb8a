use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

pub mod problems {
    pub const INVALID_TOKEN: &str = "invalid-token";
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

/// Problem Details response in the spirit of [RFC-7807](https://datatracker.ietf.org/doc/html/rfc7807).
#[derive(Debug, Serialize)]
pub struct Problem {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    #[serde(rename = "type")]
    pub ty: &'static str,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, ty: &'static str) -> Self {
        Problem {
            status,
            ty,
            detail: String::new(),
        }
    }

    pub fn unauthorized_ty(ty: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ty)
    }

    pub fn invalid_token() -> Self {
        Self::unauthorized_ty(problems::INVALID_TOKEN).with_detail("Invalid token")
    }

    pub fn with_detail<S: ToString>(self, detail: S) -> Self {
        Self {
            detail: detail.to_string(),
            ..self
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        log::debug!("problem response: {:?}", self);
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stm_test::test;

    #[test]
    fn invalid_token_problem() {
        let problem = Problem::invalid_token();
        assert_eq!(problem.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            serde_json::to_value(&problem).unwrap(),
            json!({
                "status": 401,
                "type": "invalid-token",
                "detail": "Invalid token"
            })
        );
    }
}
