// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_paragraph(words: usize) -> String {
    let base = "Compose ünïcödé text with 😀 emoji ";
    base.repeat(words / 6 + 1)
}

#[allow(dead_code)]
pub fn generate_blocks(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| ("p".to_string(), format!("Block {i} {}", generate_paragraph(12))))
        .collect()
}
