//! Pattern tables consumed by the engine stages.

pub(crate) mod classic;
pub(crate) mod helpers;
pub(crate) mod intent;
pub(crate) mod numeric;
pub(crate) mod ordering;
pub(crate) mod temporal;

#[cfg(test)]
mod tests;
