//! Ready-made filters for the Pump.fun bonding-curve program.

pub mod constants;

use crate::config::FilterConfig;
use crate::types::AccountField;

use constants::accounts;
use constants::discriminators::pumpfun_instructions;
use constants::PUMP_FUN_PROGRAM_ID;

/// Token launches (`create`).
pub fn create() -> FilterConfig {
    FilterConfig::new(
        vec![PUMP_FUN_PROGRAM_ID.to_string()],
        vec![pumpfun_instructions::CREATE],
        vec![
            AccountField::new("mint", accounts::create::MINT),
            AccountField::new("bondingCurve", accounts::create::BONDING_CURVE),
            AccountField::new(
                "associatedBondingCurve",
                accounts::create::ASSOCIATED_BONDING_CURVE,
            ),
            AccountField::new("user", accounts::create::USER),
        ],
    )
}

/// Bonding-curve trades (`buy` and `sell`).
pub fn trade() -> FilterConfig {
    FilterConfig::new(
        vec![PUMP_FUN_PROGRAM_ID.to_string()],
        vec![pumpfun_instructions::BUY, pumpfun_instructions::SELL],
        vec![
            AccountField::new("mint", accounts::trade::MINT),
            AccountField::new("bondingCurve", accounts::trade::BONDING_CURVE),
            AccountField::new("user", accounts::trade::USER),
        ],
    )
}

/// Curve completions moving liquidity to an AMM pool (`migrate`).
pub fn migrate() -> FilterConfig {
    FilterConfig::new(
        vec![PUMP_FUN_PROGRAM_ID.to_string()],
        vec![pumpfun_instructions::MIGRATE],
        vec![
            AccountField::new("mint", accounts::migrate::MINT),
            AccountField::new("bondingCurve", accounts::migrate::BONDING_CURVE),
            AccountField::new("user", accounts::migrate::USER),
            AccountField::new("poolMint", accounts::migrate::POOL_MINT),
        ],
    )
}
