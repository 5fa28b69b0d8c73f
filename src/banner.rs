// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
     _ _
 ___(_) |_ ___  __ _  ___ _ __
/ __| | __/ _ \/ _` |/ _ \ '_ \
\__ \ | ||  __/ (_| |  __/ | | |
|___/_|\__\___|\__, |\___|_| |_|
               |___/

    AI Website Generation Service
"#;
    println!("{}", banner);
}
