use alloy::providers::{DynProvider, Provider, ProviderBuilder};

use crate::client::InitConfig;
use crate::error::BridgeError;
use crate::log;
use crate::network::NetworkParams;
use crate::writing::cc;

/// Parent and child chain providers for one client.
#[derive(Clone)]
pub(crate) struct Endpoints {
    parent: DynProvider,
    child: DynProvider,
}

impl Endpoints {
    /// Build both providers and make sure each one answers. A chain id
    /// that differs from the table is only logged: a browser-style wallet
    /// exposes one provider for whichever chain is selected.
    pub(crate) async fn connect(
        params: &NetworkParams,
        config: &InitConfig,
    ) -> Result<Self, BridgeError> {
        let parent = ProviderBuilder::new()
            .connect_http(config.parent_rpc.clone())
            .erased();
        let child = ProviderBuilder::new()
            .connect_http(config.child_rpc.clone())
            .erased();

        check_chain(&parent, params, true).await?;
        check_chain(&child, params, false).await?;

        Ok(Self { parent, child })
    }

    pub(crate) fn side(&self, is_parent: bool) -> &DynProvider {
        if is_parent { &self.parent } else { &self.child }
    }
}

async fn check_chain(
    provider: &DynProvider,
    params: &NetworkParams,
    is_parent: bool,
) -> Result<u64, BridgeError> {
    let label = params.label(is_parent);
    let got = provider
        .get_chain_id()
        .await
        .map_err(|e| BridgeError::init(format!("{label} provider unreachable: {e}")))?;
    let want = params.chain_id(is_parent);
    if got != want {
        log!(
            cc::ORANGE,
            "[init] {} provider reports chain {}, expected {}",
            label,
            got,
            want
        );
    }
    Ok(got)
}
