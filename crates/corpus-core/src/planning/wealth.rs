use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::plan::{Asset, AssetCategory, ResolvedAssumptions};
use crate::plan::resolve::DEFAULT_ASSET_RETURN;
use crate::sip::contribution_future_value;
use crate::time_value::future_value;
use crate::types::{Money, Rate};
use crate::CorpusResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProjection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    pub current_value: Money,
    pub return_rate: Rate,
    pub projected_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthProjection {
    pub projected_assets: Vec<AssetProjection>,
    pub total_assets_fv: Money,
    pub sip_fv: Money,
    pub total_projected_wealth: Money,
}

/// A single year of the accumulation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year_offset: u32,
    pub calendar_year: i32,
    pub age: u32,
    pub assets_value: Money,
    pub sip_value: Money,
    pub total: Money,
    /// Straight-line path from zero to the required corpus.
    pub target: Money,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Override, then category preset, then the flat default.
pub fn asset_return(asset: &Asset) -> Rate {
    asset
        .return_override
        .or_else(|| asset.category.map(AssetCategory::default_return))
        .unwrap_or(DEFAULT_ASSET_RETURN)
}

fn assets_value_at(assets: &[&Asset], years: u32) -> CorpusResult<Money> {
    assets.iter().try_fold(Decimal::ZERO, |acc, a| {
        Ok(acc + future_value(a.current_value, asset_return(a), Decimal::from(years))?)
    })
}

/// Compound liquid holdings and the running SIP to the target age.
pub fn project_wealth(
    assets: &[Asset],
    existing_sip: Money,
    years_to_target: u32,
    pre_target_return: Rate,
) -> CorpusResult<WealthProjection> {
    let years = years_to_target.max(1);

    let projected_assets = assets
        .iter()
        .filter(|a| a.participates())
        .map(|a| {
            let return_rate = asset_return(a);
            Ok(AssetProjection {
                name: a.name.clone(),
                category: a.category,
                current_value: a.current_value,
                return_rate,
                projected_value: future_value(a.current_value, return_rate, Decimal::from(years))?,
            })
        })
        .collect::<CorpusResult<Vec<_>>>()?;

    let total_assets_fv: Money = projected_assets.iter().map(|a| a.projected_value).sum();
    let sip_fv = if existing_sip > Decimal::ZERO {
        contribution_future_value(existing_sip, pre_target_return, years)?
    } else {
        Decimal::ZERO
    };

    Ok(WealthProjection {
        projected_assets,
        total_assets_fv,
        sip_fv,
        total_projected_wealth: total_assets_fv + sip_fv,
    })
}

/// Year-by-year accumulation from today to retirement, with a linear
/// glide path toward `total_fv_required`.
pub fn projection_schedule(
    assets: &[Asset],
    resolved: &ResolvedAssumptions,
    total_fv_required: Money,
) -> CorpusResult<Vec<ProjectionYear>> {
    let liquid: Vec<&Asset> = assets.iter().filter(|a| a.participates()).collect();
    let horizon = resolved.years_to_retirement.max(1);
    let mut schedule = Vec::with_capacity(horizon as usize + 1);

    for year in 0..=horizon {
        let assets_value = assets_value_at(&liquid, year)?;
        let sip_value = if resolved.existing_sip > Decimal::ZERO {
            contribution_future_value(resolved.existing_sip, resolved.pre_retirement_return, year)?
        } else {
            Decimal::ZERO
        };
        let target = total_fv_required * (Decimal::from(year) / Decimal::from(horizon));

        schedule.push(ProjectionYear {
            year_offset: year,
            calendar_year: resolved.current_year + year as i32,
            age: resolved.current_age + year,
            assets_value,
            sip_value,
            total: assets_value + sip_value,
            target,
        });
    }

    Ok(schedule)
}
