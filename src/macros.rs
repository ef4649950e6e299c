// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! rules {
    // Catalog shorthand!
    //   rules![ "label" => pattern, policy; ... ]
    // Expands to Vec<RuleSpec<_>> in the order written (= priority order).
    ($($label:literal => $pat:expr, $policy:expr);+ $(;)?) => {
        vec![
            $( $crate::engine::types::RuleSpec::new($label, $pat, $policy), )+
        ]
    };
}
