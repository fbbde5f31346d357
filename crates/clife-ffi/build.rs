use std::env;
use std::path::Path;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set by cargo");
    let crate_dir = Path::new(&manifest_dir);

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("failed to read cbindgen.toml");

    let include_dir = crate_dir.join("include");
    std::fs::create_dir_all(&include_dir).expect("failed to create include/ directory");

    match cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(include_dir.join("clife.h"));
        }
        // A parse failure in src/ is reported by rustc with better context.
        Err(e) => println!("cargo:warning=clife.h not regenerated: {e}"),
    }

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");
}
