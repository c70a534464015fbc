//! Authentification par jeton Subsonic
//!
//! Chaque requête porte `t = md5(password + salt)` et `s = salt`, avec un sel
//! tiré au hasard à chaque appel.

use md5::{Digest, Md5};
use rand::Rng;
use url::Url;

/// Version de l'API Subsonic annoncée
pub const API_VERSION: &str = "1.16.1";

/// Nom du client annoncé
pub const CLIENT_NAME: &str = "home-radio";

const SALT_LEN: usize = 8;
const SALT_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Génère un sel aléatoire de 8 caractères base 36
pub fn generate_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| SALT_CHARSET[rng.random_range(0..SALT_CHARSET.len())] as char)
        .collect()
}

/// Jeton hexadécimal `md5(password + salt)`
pub fn token(password: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Ajoute les paramètres d'authentification à `url` avec un sel neuf
pub fn sign(url: &mut Url, username: &str, password: &str) {
    let salt = generate_salt();
    let token = token(password, &salt);

    url.query_pairs_mut()
        .append_pair("u", username)
        .append_pair("t", &token)
        .append_pair("s", &salt)
        .append_pair("v", API_VERSION)
        .append_pair("c", CLIENT_NAME)
        .append_pair("f", "json");
}
