use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Admin session tokens are `<unix-expiry>.<hex hmac>` over the expiry,
/// keyed with the configured session secret. Stateless on purpose: no
/// session table, a restart invalidates nothing.
pub fn issue(key: &[u8], ttl: Duration) -> String {
    let expires = (now_unix() + ttl).as_secs();
    format!("{}.{}", expires, hex::encode(sign(key, expires)))
}

pub fn verify(key: &[u8], token: &str) -> bool {
    let Some((expires_raw, signature_hex)) = token.split_once('.') else {
        return false;
    };
    let Ok(expires) = expires_raw.parse::<u64>() else {
        return false;
    };
    if expires <= now_unix().as_secs() {
        return false;
    }
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(expires_raw.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

fn sign(key: &[u8], expires: u64) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(expires.to_string().as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn now_unix() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}
