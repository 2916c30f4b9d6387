//! Multi-representation conversion of one ensemble.
//!
//! Output keys follow `{label}_ens_{tag}[_to_{target}]`:
//!
//! | native tag        | entries                                                     |
//! |-------------------|-------------------------------------------------------------|
//! | `norm`, `mixmod`  | identity, `_to_hist`, `_to_quant_{n}`..., `_to_interp`      |
//! | `interp`          | identity, `_to_hist`, `_to_quant_{n}`..., `_to_norm`        |
//! | `hist`, `quant`   | identity only                                               |
//!
//! Quantile entries are best-effort: a failed resolution is logged and left
//! out. Every other failure aborts the whole conversion.

use std::collections::BTreeMap;

use qn_core::{ConversionTarget, DistType, Ensemble};

use crate::config::ConversionConfig;
use crate::error::Result;
use crate::nested::{NestedTable, flatten, flatten_tables};

/// Nested tables keyed by descriptive entry name.
pub type ConvertedEnsembles = BTreeMap<String, NestedTable>;

/// Last derived entry, chosen by native type.
enum FinalStep {
    /// Moment-matched normal approximation
    ToNorm,
    /// Density sampled on the shared axis
    ToInterp,
}

/// `{label}_ens_{tag}`, with `_to_{target}` appended when given.
pub fn entry_key(label: &str, dist_type: DistType, target: Option<&str>) -> String {
    match target {
        Some(t) => format!("{}_ens_{}_to_{}", label, dist_type, t),
        None => format!("{}_ens_{}", label, dist_type),
    }
}

/// [`convert_ens_with_config`] with the default axis and quantile resolutions.
pub fn convert_ens<E: Ensemble>(ens: &E, label: &str) -> Result<ConvertedEnsembles> {
    convert_ens_with_config(ens, label, &ConversionConfig::default())
}

/// Flatten `ens` and each of its derived representations.
pub fn convert_ens_with_config<E: Ensemble>(
    ens: &E,
    label: &str,
    config: &ConversionConfig,
) -> Result<ConvertedEnsembles> {
    config.validate()?;
    let tables = ens.build_tables()?;
    let dist_type = tables.meta.dist_type()?;

    let mut out = ConvertedEnsembles::new();
    let identity = entry_key(label, dist_type, None);
    out.insert(identity.clone(), flatten_tables(&tables)?);
    log::debug!("created {}", identity);

    let final_step = match dist_type {
        DistType::Interp => FinalStep::ToNorm,
        DistType::Norm | DistType::Mixmod => FinalStep::ToInterp,
        DistType::Hist | DistType::Quant => {
            log::debug!("{}: no derived conversions for native type '{}'", label, dist_type);
            log::info!("converted {} ({}): {} entries", label, dist_type, out.len());
            return Ok(out);
        }
    };

    let axis = config.axis();

    let hist = ens.convert_to(&ConversionTarget::Hist { bins: axis.clone() })?;
    insert(&mut out, entry_key(label, dist_type, Some("hist")), flatten(&hist)?);

    for (key, attempt) in quantile_entries(ens, label, dist_type, config) {
        match attempt {
            Ok(table) => insert(&mut out, key, table),
            Err(e) => log::warn!("failed to create {}: {}", key, e),
        }
    }

    match final_step {
        FinalStep::ToNorm => {
            let mean = ens.mean()?;
            let std = ens.std()?;
            let norm = E::from_norm(mean, std)?;
            insert(&mut out, entry_key(label, dist_type, Some("norm")), flatten(&norm)?);
        }
        FinalStep::ToInterp => {
            let interp = ens.convert_to(&ConversionTarget::Interp { xvals: axis })?;
            insert(&mut out, entry_key(label, dist_type, Some("interp")), flatten(&interp)?);
        }
    }

    log::info!("converted {} ({}): {} entries", label, dist_type, out.len());
    Ok(out)
}

fn insert(out: &mut ConvertedEnsembles, key: String, table: NestedTable) {
    log::debug!("created {}", key);
    out.insert(key, table);
}

/// One independent attempt per quantile resolution.
fn quantile_entries<E: Ensemble>(
    ens: &E,
    label: &str,
    dist_type: DistType,
    config: &ConversionConfig,
) -> Vec<(String, Result<NestedTable>)> {
    config
        .quantile_resolutions
        .iter()
        .map(|&n| {
            let key = entry_key(label, dist_type, Some(format!("quant_{}", n).as_str()));
            let target = ConversionTarget::Quant { quants: config.quantile_levels(n) };
            let attempt = ens.convert_to(&target).map_err(Into::into).and_then(|q| flatten(&q));
            (key, attempt)
        })
        .collect()
}
