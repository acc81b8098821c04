use errors::*;

/// Returns the maximal width of a single block when a square domain of
/// `domain` cells is split among `procs` processes by recursive bisection.
///
/// The split axis alternates with every level, so after an even number of
/// levels the blocks are square (`domain / sqrt(procs)`), after an odd number
/// they are twice as long as wide (`domain / sqrt(2 * procs)`).
///
/// The level is `floor(log2(procs))` computed in floating point.
pub fn block_size(procs: i64, domain: i64) -> Result<u64> {
    if procs <= 0 {
        bail!(ErrorKind::InvalidArgument(format!("process count must be positive, got {}", procs)));
    }
    if domain <= 0 {
        bail!(ErrorKind::InvalidArgument(format!("domain size must be positive, got {}", domain)));
    }

    let p = procs as f64;
    let d = domain as f64;
    let level = (p.ln() / 2f64.ln()) as u32;
    trace!("{} processes bisected {} times", procs, level);

    let width = if level % 2 == 0 {
        d / p.sqrt()
    } else {
        d / (2.0 * p).sqrt()
    };
    Ok(width as u64)
}
