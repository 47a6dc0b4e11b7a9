//! Rebuild shelf-storage whenever a file under `migrations/` changes,
//! since the migrator embeds them at compile time.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
