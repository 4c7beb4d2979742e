//! Salted scrypt password hashes, stored as `cost$hex(salt):hex(key)`

use rand::RngCore;
use scrypt::Params;
use subtle::ConstantTimeEq;

use crate::error::AppError;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;

pub fn hash_password(password: &str, cost: u8) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive(password, &salt, cost)?;
    Ok(format!("{cost}${}:{}", hex::encode(salt), hex::encode(key)))
}

/// Rejects a cost that scrypt cannot run with
pub fn validate_cost(cost: u8) -> Result<(), String> {
    Params::new(cost, BLOCK_SIZE, PARALLELISM, KEY_LEN).map(|_| ()).map_err(|e| e.to_string())
}

/// Checks `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((cost, rest)) = stored.split_once('$') else { return false };
    let Some((salt, key)) = rest.split_once(':') else { return false };
    let (Ok(cost), Ok(salt), Ok(expected)) = (cost.parse::<u8>(), hex::decode(salt), hex::decode(key)) else {
        return false;
    };
    match derive(password, &salt, cost) {
        Ok(actual) => actual.as_slice().ct_eq(expected.as_slice()).into(),
        Err(_) => false,
    }
}

fn derive(password: &str, salt: &[u8], cost: u8) -> Result<[u8; KEY_LEN], AppError> {
    let params = Params::new(cost, BLOCK_SIZE, PARALLELISM, KEY_LEN)
        .map_err(|e| AppError::Internal(format!("scrypt params: {e}")))?;
    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut key)
        .map_err(|e| AppError::Internal(format!("scrypt: {e}")))?;
    Ok(key)
}
