//! Print the Argon2 PHC hash of a value, for `ADMIN_USERNAME_HASH` and
//! `ADMIN_PASSWORD_HASH`.
//!
//! ```text
//! belva-hash <value>
//! ```

use belva_api::auth::password::hash_password;

fn main() {
    let Some(value) = std::env::args().nth(1) else {
        eprintln!("usage: belva-hash <value>");
        std::process::exit(2);
    };

    match hash_password(&value) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("hashing failed: {e}");
            std::process::exit(1);
        }
    }
}
