#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! clause_rule {
    (
        name: $name:expr,
        pattern: $pat:literal
        $(, optional_phrases: [ $($opt_phrase:expr),* $(,)? ])?
        $(, buckets: $buckets:expr)?
        , prod: |$caps:ident, $env:ident| $body:block
        $(,)?
    ) => {{
        $crate::ClauseRule {
            name: $name,
            pattern: $crate::regex!($pat),
            production: Box::new(move |$caps: &regex::Captures<'_>, $env: &$crate::ClauseEnv<'_>| -> Option<String> {
                $body
            }),
            optional_phrases: &[ $($($opt_phrase),*)? ],
            buckets: { $crate::engine::BucketMask::empty() $(| $buckets)? },
        }
    }};
}
