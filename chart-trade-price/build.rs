use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy trades.json to OUT_DIR for include_str. The app still builds
    // without fixtures; it then only shows what the page hands it.
    let trades_src = Path::new("../fixtures/trades.json");
    let trades_dest = Path::new(&out_dir).join("trades.json");
    if trades_src.exists() {
        fs::copy(trades_src, &trades_dest).unwrap();
    } else {
        fs::write(&trades_dest, "[]").unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/trades.json");
}
