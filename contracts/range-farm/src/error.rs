use soroban_sdk::contracterror;

/// Errors returned by the farm contract
///
/// Any error aborts the invocation and rolls back every storage write made
/// during it, including partially applied boundary crossings.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FarmError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller does not own the position
    NotPositionOwner = 3,
    /// Position belongs to a different pool than the farm's
    PoolMismatch = 4,
    PositionNotFound = 5,
    PositionAlreadyStaked = 6,
    InvalidTickRange = 7,
    TickNotOnSpacing = 8,
    TickOutOfRange = 9,
    InvalidPeriod = 10,
    InvalidRewardRate = 11,
    /// Appraisal produced no reward weight
    ZeroWeight = 12,
    /// An active weight would go negative
    WeightUnderflow = 13,
    ArithmeticOverflow = 14,
    /// Tick index bit set without a boundary entry
    BoundaryMissing = 15,
    /// Pool tick could not be read
    OracleUnavailable = 16,
    /// Owner index or position counters disagree with stored positions
    IndexCorrupted = 17,
}
