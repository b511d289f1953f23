//! Per-chain network transports.
//!
//! A [`Transport`] describes how a chain's nodes are reached over HTTP.
//! The no-argument form selects the chain's default public RPC endpoint;
//! an explicit URL overrides it. [`TransportsConfig`] maps every active
//! chain to its transport and is validated for exhaustiveness when a
//! connection configuration is built.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::chain::{Chain, ChainId, default_chains};

/// HTTP transport for one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    /// Explicit endpoint override. `None` selects the chain's default
    /// public RPC endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

impl Transport {
    /// Default HTTP transport: the chain's built-in public RPC endpoint.
    #[must_use]
    pub const fn http() -> Self {
        Self { url: None }
    }

    /// HTTP transport pinned to an explicit endpoint.
    #[must_use]
    pub fn http_url(url: Url) -> Self {
        Self { url: Some(url) }
    }

    /// The endpoint this transport resolves to for the given chain.
    #[must_use]
    pub fn endpoint(&self, chain: &Chain) -> Url {
        self.url.clone().unwrap_or_else(|| chain.rpc_url.clone())
    }
}

/// Ordered transport map, one entry per active chain.
///
/// Serialised as a TOML map keyed by decimal chain identifiers; document
/// order is preserved on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportsConfig(pub Vec<(ChainId, Transport)>);

impl Default for TransportsConfig {
    fn default() -> Self {
        Self(
            default_chains()
                .iter()
                .map(|chain| (chain.id, Transport::http()))
                .collect(),
        )
    }
}

impl Deref for TransportsConfig {
    type Target = Vec<(ChainId, Transport)>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TransportsConfig {
    /// The transport configured for the given chain, if any.
    #[must_use]
    pub fn get(&self, id: ChainId) -> Option<&Transport> {
        self.0
            .iter()
            .find(|(chain_id, _)| *chain_id == id)
            .map(|(_, transport)| transport)
    }

    /// Chain identifiers present in the map, in document order.
    #[must_use]
    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.0.iter().map(|(id, _)| *id).collect()
    }
}

impl Serialize for TransportsConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, transport) in &self.0 {
            map.serialize_entry(id, transport)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TransportsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct TransportsVisitor;

        impl<'de> Visitor<'de> for TransportsVisitor {
            type Value = TransportsConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of chain identifiers to transport tables")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut transports = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(chain_id) = access.next_key::<ChainId>()? {
                    let transport: Transport = access.next_value()?;
                    transports.push((chain_id, transport));
                }
                Ok(TransportsConfig(transports))
            }
        }

        deserializer.deserialize_map(TransportsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::builtin;

    #[test]
    fn default_transport_resolves_to_the_chain_default_endpoint() {
        let base = builtin(ChainId::BASE).expect("built in");
        assert_eq!(Transport::http().endpoint(base), base.rpc_url);
    }

    #[test]
    fn explicit_url_overrides_the_chain_default() {
        let base = builtin(ChainId::BASE).expect("built in");
        let url = Url::parse("https://base.example.com").expect("valid url");
        assert_eq!(Transport::http_url(url.clone()).endpoint(base), url);
    }

    #[test]
    fn default_map_covers_every_builtin_chain() {
        let transports = TransportsConfig::default();
        let chain_ids: Vec<ChainId> = default_chains().iter().map(|c| c.id).collect();
        assert_eq!(transports.chain_ids(), chain_ids);
        assert!(transports.iter().all(|(_, t)| t.url.is_none()));
    }

    #[test]
    fn toml_map_preserves_order_and_overrides() {
        #[derive(Deserialize)]
        struct Doc {
            transports: TransportsConfig,
        }

        let doc = r#"
            [transports."10"]

            [transports."1"]
            url = "https://eth.example.com"
        "#;

        let doc: Doc = toml::from_str(doc).expect("valid toml");
        assert_eq!(doc.transports.chain_ids(), vec![
            ChainId::OPTIMISM,
            ChainId::ETHEREUM,
        ]);
        assert!(
            doc.transports
                .get(ChainId::OPTIMISM)
                .expect("present")
                .url
                .is_none()
        );
        assert_eq!(
            doc.transports
                .get(ChainId::ETHEREUM)
                .expect("present")
                .url
                .as_ref()
                .map(Url::as_str),
            Some("https://eth.example.com/")
        );
    }
}
