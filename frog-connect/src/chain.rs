//! Chain descriptors and the built-in chain registry.
//!
//! - [`ChainId`] — Numeric EIP-155 chain identifier, serialised in its
//!   decimal string form so it can key TOML and JSON maps.
//! - [`Chain`] — Full descriptor for one supported network.
//! - [`ChainsConfig`] — Ordered chain set with chain-ID-keyed TOML
//!   (de)serialisation, resolved against the built-in registry.

use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Numeric EIP-155 chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const ETHEREUM: Self = Self(1);
    /// OP Mainnet.
    pub const OPTIMISM: Self = Self(10);
    /// Base.
    pub const BASE: Self = Self(8453);
    /// Arbitrum One.
    pub const ARBITRUM: Self = Self(42_161);
    /// Base Sepolia testnet.
    pub const BASE_SEPOLIA: Self = Self(84_532);
    /// Zora.
    pub const ZORA: Self = Self(7_777_777);
    /// Degen Chain.
    pub const DEGEN: Self = Self(666_666_666);
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // String form: chain ids key TOML and JSON maps.
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error as DeError, Visitor};

        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ChainId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a numeric chain id or its decimal string form")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(ChainId(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                v.parse::<u64>()
                    .map(ChainId)
                    .map_err(|_| E::custom(format!("invalid chain id '{v}'")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name (e.g. `"Ether"`).
    pub name: String,
    /// Ticker symbol (e.g. `"ETH"`).
    pub symbol: String,
    /// Number of decimals of the smallest unit.
    pub decimals: u8,
}

impl NativeCurrency {
    /// Creates a currency descriptor.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Ether with 18 decimals, the currency of most supported chains.
    #[must_use]
    pub fn ether() -> Self {
        Self::new("Ether", "ETH", 18)
    }
}

/// Descriptor for one supported blockchain network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    /// Numeric EIP-155 chain identifier.
    pub id: ChainId,
    /// Display name.
    pub name: String,
    /// Native currency.
    pub native_currency: NativeCurrency,
    /// Default public RPC endpoint.
    pub rpc_url: Url,
    /// Block explorer, if the chain has a canonical one.
    pub explorer_url: Option<Url>,
    /// Whether this is a test network.
    pub testnet: bool,
}

fn descriptor(
    id: ChainId,
    name: &str,
    native_currency: NativeCurrency,
    rpc_url: &str,
    explorer_url: &str,
    testnet: bool,
) -> Chain {
    Chain {
        id,
        name: name.to_owned(),
        native_currency,
        rpc_url: Url::parse(rpc_url).expect("valid registry RPC endpoint"),
        explorer_url: Some(Url::parse(explorer_url).expect("valid registry explorer URL")),
        testnet,
    }
}

static BUILTIN: LazyLock<Vec<Chain>> = LazyLock::new(|| {
    vec![
        descriptor(
            ChainId::ETHEREUM,
            "Ethereum",
            NativeCurrency::ether(),
            "https://eth.merkle.io",
            "https://etherscan.io",
            false,
        ),
        descriptor(
            ChainId::ARBITRUM,
            "Arbitrum One",
            NativeCurrency::ether(),
            "https://arb1.arbitrum.io/rpc",
            "https://arbiscan.io",
            false,
        ),
        descriptor(
            ChainId::BASE,
            "Base",
            NativeCurrency::ether(),
            "https://mainnet.base.org",
            "https://basescan.org",
            false,
        ),
        descriptor(
            ChainId::BASE_SEPOLIA,
            "Base Sepolia",
            NativeCurrency::new("Sepolia Ether", "ETH", 18),
            "https://sepolia.base.org",
            "https://sepolia.basescan.org",
            true,
        ),
        descriptor(
            ChainId::DEGEN,
            "Degen",
            NativeCurrency::new("Degen", "DEGEN", 18),
            "https://rpc.degen.tips",
            "https://explorer.degen.tips",
            false,
        ),
        descriptor(
            ChainId::OPTIMISM,
            "OP Mainnet",
            NativeCurrency::ether(),
            "https://mainnet.optimism.io",
            "https://optimistic.etherscan.io",
            false,
        ),
        descriptor(
            ChainId::ZORA,
            "Zora",
            NativeCurrency::ether(),
            "https://rpc.zora.energy",
            "https://explorer.zora.energy",
            false,
        ),
    ]
});

/// The built-in chain set, in priority order.
#[must_use]
pub fn default_chains() -> &'static [Chain] {
    &BUILTIN
}

/// Looks up a chain in the built-in registry.
#[must_use]
pub fn builtin(id: ChainId) -> Option<&'static Chain> {
    BUILTIN.iter().find(|chain| chain.id == id)
}

/// Per-chain TOML table: every field optional, resolved against the
/// built-in registry.
///
/// An empty table selects the built-in descriptor unchanged; set fields
/// override it. Chains outside the registry must set at least `name`
/// and `rpc_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Display name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// RPC endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<Url>,
    /// Native currency override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    /// Block explorer override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<Url>,
    /// Testnet flag override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testnet: Option<bool>,
}

impl ChainSpec {
    /// Resolves this spec into a full [`Chain`] descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the built-in registry and the
    /// spec does not define `name` and `rpc_url`.
    pub fn resolve(&self, id: ChainId) -> Result<Chain, Error> {
        if let Some(base) = builtin(id) {
            let mut chain = base.clone();
            if let Some(name) = &self.name {
                chain.name = name.clone();
            }
            if let Some(rpc_url) = &self.rpc_url {
                chain.rpc_url = rpc_url.clone();
            }
            if let Some(native_currency) = &self.native_currency {
                chain.native_currency = native_currency.clone();
            }
            if let Some(explorer_url) = &self.explorer_url {
                chain.explorer_url = Some(explorer_url.clone());
            }
            if let Some(testnet) = self.testnet {
                chain.testnet = testnet;
            }
            return Ok(chain);
        }

        let name = self
            .name
            .clone()
            .ok_or_else(|| Error::chain(format!("chain {id} is not built in and sets no name")))?;
        let rpc_url = self.rpc_url.clone().ok_or_else(|| {
            Error::chain(format!("chain {id} is not built in and sets no rpc_url"))
        })?;
        Ok(Chain {
            id,
            name,
            native_currency: self
                .native_currency
                .clone()
                .unwrap_or_else(NativeCurrency::ether),
            rpc_url,
            explorer_url: self.explorer_url.clone(),
            testnet: self.testnet.unwrap_or(false),
        })
    }
}

impl From<&Chain> for ChainSpec {
    fn from(chain: &Chain) -> Self {
        Self {
            name: Some(chain.name.clone()),
            rpc_url: Some(chain.rpc_url.clone()),
            native_currency: Some(chain.native_currency.clone()),
            explorer_url: chain.explorer_url.clone(),
            testnet: Some(chain.testnet),
        }
    }
}

/// Ordered set of active chains.
///
/// Serialised as a TOML map keyed by decimal chain identifiers; document
/// order is preserved on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainsConfig(pub Vec<Chain>);

impl Default for ChainsConfig {
    fn default() -> Self {
        Self(default_chains().to_vec())
    }
}

impl Deref for ChainsConfig {
    type Target = Vec<Chain>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for ChainsConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for chain in &self.0 {
            map.serialize_entry(&chain.id, &ChainSpec::from(chain))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChainsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct ChainsVisitor;

        impl<'de> Visitor<'de> for ChainsVisitor {
            type Value = ChainsConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of chain identifiers to chain tables")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut chains = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(chain_id) = access.next_key::<ChainId>()? {
                    let spec: ChainSpec = access.next_value()?;
                    let chain = spec
                        .resolve(chain_id)
                        .map_err(|e| serde::de::Error::custom(format!("{e}")))?;
                    chains.push(chain);
                }
                Ok(ChainsConfig(chains))
            }
        }

        deserializer.deserialize_map(ChainsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_the_seven_supported_chains_in_order() {
        let ids: Vec<ChainId> = default_chains().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![
            ChainId::ETHEREUM,
            ChainId::ARBITRUM,
            ChainId::BASE,
            ChainId::BASE_SEPOLIA,
            ChainId::DEGEN,
            ChainId::OPTIMISM,
            ChainId::ZORA,
        ]);
    }

    #[test]
    fn registry_ids_are_unique() {
        let mut ids: Vec<u64> = default_chains().iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), default_chains().len());
    }

    #[test]
    fn builtin_lookup() {
        let zora = builtin(ChainId::ZORA).expect("Zora is built in");
        assert_eq!(zora.name, "Zora");
        assert_eq!(zora.rpc_url.as_str(), "https://rpc.zora.energy/");
        assert!(builtin(ChainId(5)).is_none());
    }

    #[test]
    fn base_sepolia_is_the_only_testnet() {
        let testnets: Vec<ChainId> = default_chains()
            .iter()
            .filter(|c| c.testnet)
            .map(|c| c.id)
            .collect();
        assert_eq!(testnets, vec![ChainId::BASE_SEPOLIA]);
    }

    #[test]
    fn chain_id_serialises_to_its_decimal_string() {
        let json = serde_json::to_value(ChainId::BASE).expect("serialise");
        assert_eq!(json, serde_json::json!("8453"));
    }

    #[test]
    fn chain_id_deserialises_from_number_and_string() {
        let from_number: ChainId =
            serde_json::from_value(serde_json::json!(8453)).expect("number form");
        let from_string: ChainId =
            serde_json::from_value(serde_json::json!("8453")).expect("string form");
        assert_eq!(from_number, ChainId::BASE);
        assert_eq!(from_string, ChainId::BASE);
        assert!(serde_json::from_value::<ChainId>(serde_json::json!("mainnet")).is_err());
    }

    #[test]
    fn empty_spec_resolves_to_the_builtin_descriptor() {
        let chain = ChainSpec::default()
            .resolve(ChainId::OPTIMISM)
            .expect("built in");
        assert_eq!(&chain, builtin(ChainId::OPTIMISM).expect("built in"));
    }

    #[test]
    fn spec_overrides_the_builtin_rpc_url() {
        let spec = ChainSpec {
            rpc_url: Some(Url::parse("https://eth.example.com").expect("valid url")),
            ..ChainSpec::default()
        };
        let chain = spec.resolve(ChainId::ETHEREUM).expect("built in");
        assert_eq!(chain.name, "Ethereum");
        assert_eq!(chain.rpc_url.as_str(), "https://eth.example.com/");
    }

    #[test]
    fn unknown_chain_requires_name_and_rpc_url() {
        let err = ChainSpec::default()
            .resolve(ChainId(31_337))
            .expect_err("unknown chain");
        assert!(matches!(err, Error::Chain(_)));

        let spec = ChainSpec {
            name: Some("Anvil".to_owned()),
            rpc_url: Some(Url::parse("http://127.0.0.1:8545").expect("valid url")),
            ..ChainSpec::default()
        };
        let chain = spec.resolve(ChainId(31_337)).expect("fully specified");
        assert_eq!(chain.native_currency, NativeCurrency::ether());
        assert!(!chain.testnet);
    }

    #[test]
    fn chains_config_preserves_document_order() {
        let doc = r#"
            [chains."7777777"]
            [chains."1"]
        "#;

        #[derive(Deserialize)]
        struct Doc {
            chains: ChainsConfig,
        }

        let doc: Doc = toml::from_str(doc).expect("valid toml");
        let ids: Vec<ChainId> = doc.chains.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ChainId::ZORA, ChainId::ETHEREUM]);
    }
}
