//! Active issuance: total minus inactive.

use crate::error::TallyError;
use crate::normalize::normalize;

use govtally_chain::ChainSource;
use govtally_types::{Balance, Network};

/// Query total and inactive issuance from the network's issuance module.
pub async fn active_issuance<C: ChainSource>(
    chain: &C,
    network: Network,
) -> Result<Balance, TallyError> {
    let module = network.issuance_module();
    let issuance = chain.issuance(module).await?;
    let total = normalize(Some(&issuance.total))?;
    let inactive = normalize(Some(&issuance.inactive))?;
    Ok(total.saturating_sub(&inactive))
}

/// Like [`active_issuance`], logging failures and returning `None`.
pub async fn active_issuance_or_none<C: ChainSource>(chain: &C, network: Network) -> Option<Balance> {
    match active_issuance(chain, network).await {
        Ok(active) => Some(active),
        Err(e) => {
            tracing::warn!(%network, error = %e, "active issuance unavailable");
            None
        }
    }
}
