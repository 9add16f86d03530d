//! Help overlay content loaded from `help-strings/*.txt` at compile time.

macro_rules! include_help {
    ($name:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/help-strings/",
            $name,
            ".txt"
        ))
    };
}

pub fn chart() -> &'static str {
    include_help!("chart")
}

pub fn table() -> &'static str {
    include_help!("table")
}

pub fn filter() -> &'static str {
    include_help!("filter")
}
