use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::{
    meta,
    parse::{Error as ParseError, Parser},
    parse_macro_input, ItemFn, LitStr, ReturnType,
};

#[derive(Default, Debug)]
struct TestAttributes {
    pub skip: Option<LitStr>,
}

impl TestAttributes {
    fn parse(input: TokenStream) -> Result<Self, ParseError> {
        let mut attrs = Self::default();

        let parser = meta::parser(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported test property"))
            }
        });

        parser.parse(input)?;
        Ok(attrs)
    }
}

/// Test attribute that installs the shared test logger before running the body.
/// Async functions run on a multi-threaded tokio runtime. Supported properties
/// - skip - skip the test with the given reason
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match TestAttributes::parse(attr) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as ItemFn);

    let mut test_decors = Vec::new();
    if input.sig.asyncness.is_some() {
        test_decors.push(quote! { #[::tokio::test(flavor = "multi_thread")] });
    } else {
        test_decors.push(quote! { #[::core::prelude::v1::test] });
    };

    if let Some(skip) = attrs.skip {
        test_decors.push(quote! { #[ignore = #skip] });
    }

    expand_wrapper(&test_decors, &input)
}

/// Emit code for a wrapper function around a test function.
fn expand_wrapper(test_decors: &[Tokens], input: &ItemFn) -> TokenStream {
    let async_token = &input.sig.asyncness;
    let await_token = async_token.map(|_| quote! {.await});

    let attrs = &input.attrs;
    let body = &input.block;
    let test_name = &input.sig.ident;

    // Note: Rust does not allow us to have a test function with #[should_panic] that has a non-unit return value.
    let ret = match &input.sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(_, ty) => quote! {-> #ty},
    };

    let result = quote! {
      #(#test_decors)*
      #(#attrs)*
      #async_token fn #test_name() #ret {
        #async_token fn test_impl() #ret {
          #body
        }

        ::stm_test::setup_test();

        test_impl()#await_token
      }
    };
    result.into()
}
