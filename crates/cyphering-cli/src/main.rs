//! Command-line interface for the AES and RSA engines.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rsa_core::{hex_to_int, int_to_hex, KeyGenConfig, KeyGenerator, KeyPair, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// AES / RSA CLI.
#[derive(Parser)]
#[command(
    name = "cyphering",
    version,
    author,
    about = "AES-128/192/256 and textbook RSA from first principles"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Optional RNG seed for reproducible key material.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random AES key as hex.
    AesKey {
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: u32,
    },
    /// Encrypt a message with AES, printing the ciphertext as hex.
    AesEnc {
        /// AES key as hex.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: u32,
        /// Plaintext message.
        #[arg(long)]
        message: String,
    },
    /// Decrypt hex ciphertext with AES.
    AesDec {
        /// AES key as hex.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: u32,
        /// Ciphertext as hex.
        #[arg(long, value_name = "HEX")]
        ciphertext_hex: String,
    },
    /// Generate an RSA key pair and write it as JSON.
    RsaKeygen {
        /// Bit size of each prime; the modulus is about twice as long.
        #[arg(long, default_value_t = 1024)]
        bits: u64,
        /// Output path for the key file.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Miller–Rabin rounds per candidate (at least 1).
        #[arg(
            long,
            default_value_t = rsa_core::DEFAULT_PRIME_TEST_ROUNDS,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        rounds: u32,
        /// Search for both primes in parallel.
        #[arg(long, default_value_t = false)]
        concurrent: bool,
    },
    /// Encrypt a message with the public half of a key file.
    RsaEnc {
        /// Path to the key file.
        #[arg(long, value_name = "FILE")]
        keys: PathBuf,
        /// Plaintext message.
        #[arg(long)]
        message: String,
    },
    /// Decrypt a hex ciphertext with the private half of a key file.
    RsaDec {
        /// Path to the key file.
        #[arg(long, value_name = "FILE")]
        keys: PathBuf,
        /// Ciphertext as hex.
        #[arg(long, value_name = "HEX")]
        ciphertext: String,
    },
    /// Encrypt every leaf of a JSON document.
    RsaEncJson {
        /// Path to the key file.
        #[arg(long, value_name = "FILE")]
        keys: PathBuf,
        /// JSON document to encrypt.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Decrypt every leaf of an encrypted JSON document.
    RsaDecJson {
        /// Path to the key file.
        #[arg(long, value_name = "FILE")]
        keys: PathBuf,
        /// Encrypted JSON document.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Run a local demo of both engines.
    Demo {
        /// Bit size of each RSA prime.
        #[arg(long, default_value_t = 512)]
        bits: u64,
    },
}

/// On-disk key pair, every integer as lowercase hex.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct KeyFile {
    public_exponent: String,
    private_exponent: String,
    modulus: String,
}

impl KeyFile {
    fn from_pair(keys: &KeyPair) -> Self {
        Self {
            public_exponent: int_to_hex(&keys.public_exponent),
            private_exponent: int_to_hex(&keys.private_exponent),
            modulus: int_to_hex(&keys.modulus),
        }
    }

    fn to_pair(&self) -> Result<KeyPair> {
        Ok(KeyPair {
            public_exponent: hex_to_int(&self.public_exponent).context("public exponent")?,
            private_exponent: hex_to_int(&self.private_exponent).context("private exponent")?,
            modulus: hex_to_int(&self.modulus).context("modulus")?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let seed = cli.seed;
    match cli.command {
        Commands::AesKey { bits } => cmd_aes_key(bits, seed),
        Commands::AesEnc {
            key_hex,
            bits,
            message,
        } => cmd_aes_enc(&key_hex, bits, &message),
        Commands::AesDec {
            key_hex,
            bits,
            ciphertext_hex,
        } => cmd_aes_dec(&key_hex, bits, &ciphertext_hex),
        Commands::RsaKeygen {
            bits,
            out,
            rounds,
            concurrent,
        } => cmd_rsa_keygen(bits, &out, rounds, concurrent, seed),
        Commands::RsaEnc { keys, message } => cmd_rsa_enc(&keys, &message),
        Commands::RsaDec { keys, ciphertext } => cmd_rsa_dec(&keys, &ciphertext),
        Commands::RsaEncJson { keys, input } => cmd_rsa_json(&keys, &input, true),
        Commands::RsaDecJson { keys, input } => cmd_rsa_json(&keys, &input, false),
        Commands::Demo { bits } => cmd_demo(bits, seed),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_aes_key(bits: u32, seed: Option<u64>) -> Result<()> {
    let size = aes_size(bits)?;
    let mut rng = seeded_rng(seed);
    let key = aes_core::generate_key_with(&mut rng, size).context("draw AES key")?;
    println!("{}", hex::encode(key));
    Ok(())
}

fn cmd_aes_enc(key_hex: &str, bits: u32, message: &str) -> Result<()> {
    let key = parse_hex(key_hex, "key")?;
    let ciphertext = aes_core::encrypt(message, &key, bits).context("AES encryption")?;
    println!("{}", hex::encode(ciphertext));
    Ok(())
}

fn cmd_aes_dec(key_hex: &str, bits: u32, ciphertext_hex: &str) -> Result<()> {
    let key = parse_hex(key_hex, "key")?;
    let ciphertext = parse_hex(ciphertext_hex, "ciphertext")?;
    let message = aes_core::decrypt(&ciphertext, &key, bits).context("AES decryption")?;
    println!("{message}");
    Ok(())
}

fn cmd_rsa_keygen(
    bits: u64,
    out: &Path,
    rounds: u32,
    concurrent: bool,
    seed: Option<u64>,
) -> Result<()> {
    let config = KeyGenConfig {
        prime_test_rounds: rounds,
        concurrent_primes: concurrent,
    };
    let keys = KeyGenerator::with_config(seeded_rng(seed), config)
        .generate(bits)
        .context("generate RSA keys")?;
    save_keys(out, &keys)?;
    info!(modulus_bits = keys.modulus_bits(), path = %out.display(), "wrote key file");
    println!("modulus bits: {}", keys.modulus_bits());
    Ok(())
}

fn cmd_rsa_enc(keys_path: &Path, message: &str) -> Result<()> {
    let keys = load_keys(keys_path)?;
    let ciphertext = keys
        .public_key()
        .encrypt(message)
        .context("RSA encryption")?;
    println!("{ciphertext}");
    Ok(())
}

fn cmd_rsa_dec(keys_path: &Path, ciphertext: &str) -> Result<()> {
    let keys = load_keys(keys_path)?;
    let message = keys
        .private_key()
        .decrypt(ciphertext.trim())
        .context("RSA decryption")?;
    println!("{message}");
    Ok(())
}

fn cmd_rsa_json(keys_path: &Path, input: &Path, encrypt: bool) -> Result<()> {
    let keys = load_keys(keys_path)?;
    let text = fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let document: Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", input.display()))?;
    let transformed = if encrypt {
        keys.public_key().encrypt_structure(&document)
    } else {
        keys.private_key().decrypt_structure(&document)
    }
    .context("structural transform")?;
    println!("{}", serde_json::to_string_pretty(&transformed)?);
    Ok(())
}

fn cmd_demo(bits: u64, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);

    let aes_key = aes_core::generate_key_with(&mut rng, aes_core::KeySize::Aes256)
        .context("draw AES key")?;
    let aes_message = "message for the block cipher";
    let aes_ciphertext = aes_core::encrypt(aes_message, &aes_key, 256)?;
    let aes_decrypted = aes_core::decrypt(&aes_ciphertext, &aes_key, 256)?;
    println!("aes key: {}", hex::encode(&aes_key));
    println!("aes ciphertext: {}", hex::encode(&aes_ciphertext));
    println!("aes decrypted: {aes_decrypted}");
    if aes_decrypted != aes_message {
        bail!("AES demo roundtrip failed");
    }

    let gen_rng = ChaCha20Rng::from_seed(derive_seed(&mut rng));
    let keys = KeyGenerator::new(gen_rng)
        .generate(bits)
        .context("generate RSA keys")?;
    debug!(modulus_bits = keys.modulus_bits(), "demo keys ready");
    let public = keys.public_key();
    let private = keys.private_key();

    let ciphertext = public.encrypt("message")?;
    let plaintext = private.decrypt(&ciphertext)?;
    println!("rsa ciphertext: {ciphertext}");
    println!("rsa decrypted: {plaintext}");
    if plaintext != "message" {
        bail!("RSA demo roundtrip failed");
    }

    let document = json!({
        "name": "Alice",
        "age": 30,
        "height": 5.7,
        "address": {"city": "Wonderland", "zip": 12345},
        "items": ["apple", "banana", 42, 3.14],
    });
    let encrypted = public.encrypt_structure(&document)?;
    println!("encrypted document: {encrypted}");
    let decrypted = private.decrypt_structure(&encrypted)?;
    println!("decrypted document: {decrypted}");
    Ok(())
}

fn aes_size(bits: u32) -> Result<aes_core::KeySize> {
    match aes_core::KeySize::try_from(bits) {
        Ok(size) => Ok(size),
        Err(bits) => bail!("AES key size must be 128, 192 or 256 bits, got {bits}"),
    }
}

fn parse_hex(hex_str: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))
}

fn save_keys(path: &Path, keys: &KeyPair) -> Result<()> {
    let text = serde_json::to_string_pretty(&KeyFile::from_pair(keys))?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

fn load_keys(path: &Path) -> Result<KeyPair> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: KeyFile =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    file.to_pair()
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

fn derive_seed(rng: &mut impl RngCore) -> [u8; 32] {
    let mut seed_bytes = [0u8; 32];
    rng.fill_bytes(&mut seed_bytes);
    seed_bytes
}
