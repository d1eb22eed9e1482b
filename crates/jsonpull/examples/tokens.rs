//! Walks one document through all three layers of the crate: the raw
//! lexical token stream, the decoder's semantic token stream (colons and
//! commas elided), and a fully decoded [`jsonpull::Value`].
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonpull --example tokens
//! ```

use jsonpull::{Decoder, Scanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = r#"{"a": 1,"b": 123.456, "c": [null]}"#;

    println!("input: {input}");

    println!("\nlexical tokens:");
    let mut scanner = Scanner::new(input.as_bytes());
    while let Some(tok) = scanner.next() {
        println!("  {}", String::from_utf8_lossy(tok));
    }
    if let Some(err) = scanner.error() {
        return Err(format!("scan: {err}").into());
    }

    println!("\nsemantic tokens:");
    let mut decoder = Decoder::new(input.as_bytes());
    while let Some(tok) = decoder.next_token()? {
        println!("  {}", String::from_utf8_lossy(tok));
    }

    let value = Decoder::new(input.as_bytes()).decode()?;
    println!("\ndecoded: {value}");

    Ok(())
}
