use core::fmt;

use soroban_sdk::contracttype;

/// Coarse classification of a [`ContractError`], used by off-chain callers
/// to decide whether re-querying state can make a resubmission succeed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed arguments or configuration.
    Validation = 1,
    /// The caller lacks the role or ownership the call requires.
    Authorization = 2,
    /// The request is well formed but the current ledger state rejects it.
    State = 3,
    /// A checked computation overflowed.
    Arithmetic = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotAnAdmin = 4,
    FeaturePaused = 5,
    InsufficientFunds = 6,
    NothingToClaim = 7,
    NotAReceivingContract = 8,
    NotAllowedToSetMultipliers = 9,
    InvalidAmount = 10,
    InvalidMultiplier = 11,
    InvalidSchedule = 12,
    ItemNotLockedByAccount = 13,
    InvalidViewingKey = 14,
    RewardReserveExhausted = 15,
    ArithmeticOverflow = 16,
    InvalidInput = 17,
    DepositSumMismatch = 18,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidAmount
            | ContractError::InvalidMultiplier
            | ContractError::InvalidSchedule
            | ContractError::InvalidInput
            | ContractError::DepositSumMismatch => ErrorCategory::Validation,
            ContractError::Unauthorized
            | ContractError::NotAnAdmin
            | ContractError::NotAReceivingContract
            | ContractError::NotAllowedToSetMultipliers
            | ContractError::ItemNotLockedByAccount
            | ContractError::InvalidViewingKey => ErrorCategory::Authorization,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::FeaturePaused
            | ContractError::InsufficientFunds
            | ContractError::NothingToClaim
            | ContractError::RewardReserveExhausted => ErrorCategory::State,
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Human-readable text for the error.
    ///
    /// Clients match on these strings: paused features end in `"is paused"`,
    /// admin rejections start with `"not an admin:"`.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "contract has not been initialized",
            ContractError::AlreadyInitialized => "contract is already initialized",
            ContractError::Unauthorized => "caller is neither the admin nor a pauser",
            ContractError::NotAnAdmin => "not an admin: caller does not hold the admin role",
            ContractError::FeaturePaused => "feature is paused",
            ContractError::InsufficientFunds => "insufficient staked funds",
            ContractError::NothingToClaim => "nothing to claim",
            ContractError::NotAReceivingContract => {
                "address is not a receiving contract, sending tokens from platform is not allowed"
            }
            ContractError::NotAllowedToSetMultipliers => {
                "address is not allowed to set multipliers"
            }
            ContractError::InvalidAmount => "amount must be positive",
            ContractError::InvalidMultiplier => "multiplier can't be less than 1x",
            ContractError::InvalidSchedule => "schedule end blocks must be strictly increasing",
            ContractError::ItemNotLockedByAccount => "item was not locked by this account",
            ContractError::InvalidViewingKey => "wrong viewing key for this address or viewing key not set",
            ContractError::RewardReserveExhausted => "reward reserve cannot cover accrued rewards",
            ContractError::ArithmeticOverflow => "arithmetic overflow",
            ContractError::InvalidInput => "invalid input parameters provided",
            ContractError::DepositSumMismatch => {
                "the sum of deposits to user accounts does not add up to the amount sent"
            }
        }
    }
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
