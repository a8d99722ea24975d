// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! query {
    // Query-string shorthand!
    //   query![]                       → no parameters
    //   query!["id" => 561, "timestep" => "5m"]
    // Values go through ToString so ids, timestamps and &str all fit.
    () => {
        ::std::vec::Vec::<(&'static str, ::std::string::String)>::new()
    };
    ($($key:literal => $val:expr),+ $(,)?) => {
        ::std::vec![$(($key, ::std::string::ToString::to_string(&$val))),+]
    };
}
