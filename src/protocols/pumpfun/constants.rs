pub const PUMP_FUN_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
pub const PUMP_FUN_PROGRAM_NAME: &str = "Pumpfun";

pub mod discriminators {
    pub mod pumpfun_instructions {
        pub const CREATE: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];
        pub const MIGRATE: [u8; 8] = [155, 234, 231, 146, 236, 158, 162, 30];
        pub const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];
        pub const SELL: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];
    }
}

/// Account positions inside Pump.fun instructions.
pub mod accounts {
    pub mod create {
        pub const MINT: usize = 0;
        pub const BONDING_CURVE: usize = 2;
        pub const ASSOCIATED_BONDING_CURVE: usize = 3;
        pub const USER: usize = 7;
    }

    pub mod trade {
        pub const MINT: usize = 2;
        pub const BONDING_CURVE: usize = 3;
        pub const USER: usize = 6;
    }

    pub mod migrate {
        pub const MINT: usize = 2;
        pub const BONDING_CURVE: usize = 3;
        pub const USER: usize = 5;
        pub const POOL_MINT: usize = 9;
    }
}
