//! Predefined ticker sets for seeding a watchlist in one step.

use std::str::FromStr;

use crate::error::StockPosError;

/// Large-cap US tech.
pub const GLOBAL_TECH: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Milan-listed banks.
pub const ITALIAN_BANKS: &[&str] = &[
    "BAMI.MI", "BMED.MI", "BMPS.MI", "BPE.MI", "FBK.MI", "ISP.MI", "MB.MI", "UCG.MI",
];

/// FTSE MIB constituents.
pub const FTSE_MIB: &[&str] = &[
    "A2A.MI", "AMP.MI", "AZM.MI", "BAMI.MI", "BC.MI", "BMED.MI", "BMPS.MI", "BPE.MI", "BPSO.MI",
    "CPR.MI", "DIA.MI", "ENEL.MI", "ENI.MI", "ERG.MI", "FBK.MI", "G.MI", "HER.MI", "IG.MI",
    "INW.MI", "IP.MI", "ISP.MI", "IVG.MI", "LDO.MI", "MB.MI", "MONC.MI", "NEXI.MI", "PIRC.MI",
    "PST.MI", "PRY.MI", "RACE.MI", "REC.MI", "SPM.MI", "SRG.MI", "STLAM.MI", "STMMI.MI", "TEN.MI",
    "TIT.MI", "TRN.MI", "UCG.MI", "UNI.MI",
];

/// A named predefined ticker set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    GlobalTech,
    ItalianBanks,
    FtseMib,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[Preset::GlobalTech, Preset::ItalianBanks, Preset::FtseMib];

    /// The canonical name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::GlobalTech => "global-tech",
            Preset::ItalianBanks => "italian-banks",
            Preset::FtseMib => "ftse-mib",
        }
    }

    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            Preset::GlobalTech => GLOBAL_TECH,
            Preset::ItalianBanks => ITALIAN_BANKS,
            Preset::FtseMib => FTSE_MIB,
        }
    }
}

impl FromStr for Preset {
    type Err = StockPosError;

    /// Case-insensitive, with shorthand aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global-tech" | "tech" => Ok(Preset::GlobalTech),
            "italian-banks" | "banks" => Ok(Preset::ItalianBanks),
            "ftse-mib" | "mib" => Ok(Preset::FtseMib),
            _ => Err(StockPosError::InvalidInput(format!(
                "unknown preset '{}'. Valid values: global-tech (tech), italian-banks (banks), ftse-mib (mib)",
                s
            ))),
        }
    }
}
