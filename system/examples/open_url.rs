use catchat_system::{open_url, platform_version};

fn main() {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://catchat-meow.netlify.app/".to_string());

    println!("Platform version: {:?}", platform_version());

    match open_url(&url) {
        Ok(()) => println!("Handed {url} to the default browser"),
        Err(e) => eprintln!("Could not open {url}: {e}"),
    }
}
