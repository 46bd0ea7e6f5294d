//! Dependency flags for PyInstaller.
//!
//! Most of these are auto-detected by PyInstaller's analysis; they are listed
//! explicitly so a detection miss cannot silently drop them.

use super::interpreter::Interpreter;
use crate::config::DependencyConfig;

/// Preferred crypto module (pycryptodomex).
pub const CRYPTODOME: &str = "Cryptodome";

/// Fallback crypto module (pycryptodome).
pub const CRYPTO: &str = "Crypto";

/// Outcome of probing for the crypto module.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CryptoModule {
    /// `Cryptodome` imports, or neither does.
    Cryptodome,
    /// Only `Crypto` imports.
    Crypto,
}

impl CryptoModule {
    /// Picks the module from import results.
    pub fn select(has_cryptodome: bool, has_crypto: bool) -> Self {
        if !has_cryptodome && has_crypto {
            Self::Crypto
        } else {
            Self::Cryptodome
        }
    }

    /// Probes `interpreter`. `Crypto` is only imported when `Cryptodome` fails.
    pub async fn probe(interpreter: &Interpreter) -> Self {
        if interpreter.can_import(CRYPTODOME).await {
            return Self::Cryptodome;
        }

        let selected = Self::select(false, interpreter.can_import(CRYPTO).await);
        if selected == Self::Cryptodome {
            log::debug!("Neither Cryptodome nor Crypto importable, keeping Cryptodome");
        }
        selected
    }

    /// Warning to show when the fallback module was chosen.
    pub fn fallback_warning(self) -> Option<&'static str> {
        match self {
            Self::Crypto => Some(
                "Using Crypto since Cryptodome is not available. \
                 Install with: pip install pycryptodomex",
            ),
            Self::Cryptodome => None,
        }
    }

    /// Import name of the module.
    pub fn module_name(self) -> &'static str {
        match self {
            Self::Cryptodome => CRYPTODOME,
            Self::Crypto => CRYPTO,
        }
    }
}

/// Hidden imports, submodule collection and exclusions, in that order.
pub fn dependency_options<'a>(
    crypto: CryptoModule,
    config: &'a DependencyConfig,
) -> impl Iterator<Item = String> + 'a {
    let hidden = std::iter::once(crypto.module_name())
        .chain(config.hidden_imports.iter().map(String::as_str))
        .map(|module| format!("--hidden-import={module}"));
    let collected = config
        .collect_submodules
        .iter()
        .map(|module| format!("--collect-submodules={module}"));
    let excluded = config
        .exclude_modules
        .iter()
        .map(|module| format!("--exclude-module={module}"));

    hidden.chain(collected).chain(excluded)
}
