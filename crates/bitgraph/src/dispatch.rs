use crate::bitset::BITS_PER_WORD;
use crate::Error;

/// Largest supported capacity, in words.
pub const MAX_GRAPH_WORDS: usize = 1024;

/// A computation that is generic over the bitset word count.
///
/// Implementors get monomorphised once per rung of the capacity ladder; the
/// dispatcher picks the rung at runtime. This is what keeps the search hot
/// path free of heap traffic: every inner loop is bounded by a constant known
/// at the dispatch point.
pub trait SizedRun {
    type Output;

    fn run<const W: usize>(self) -> Self::Output;
}

/// Runs `run` at the smallest capacity ladder rung that fits a graph with
/// `n` vertices.
///
/// A graph whose order lands exactly on a rung boundary takes the next rung
/// up, so `n == 64` runs with two words. Fails with
/// [`Error::GraphTooBig`] past the top of the ladder.
pub fn dispatch_graph_size<R: SizedRun>(n: usize, run: R) -> Result<R::Output, Error> {
    if n < BITS_PER_WORD {
        Ok(run.run::<1>())
    } else if n < 2 * BITS_PER_WORD {
        Ok(run.run::<2>())
    } else if n < 4 * BITS_PER_WORD {
        Ok(run.run::<4>())
    } else if n < 8 * BITS_PER_WORD {
        Ok(run.run::<8>())
    } else if n < 16 * BITS_PER_WORD {
        Ok(run.run::<16>())
    } else if n < 32 * BITS_PER_WORD {
        Ok(run.run::<32>())
    } else if n < 64 * BITS_PER_WORD {
        Ok(run.run::<64>())
    } else if n < 128 * BITS_PER_WORD {
        Ok(run.run::<128>())
    } else if n < 256 * BITS_PER_WORD {
        Ok(run.run::<256>())
    } else if n < 512 * BITS_PER_WORD {
        Ok(run.run::<512>())
    } else if n < 1024 * BITS_PER_WORD {
        Ok(run.run::<1024>())
    } else {
        Err(Error::GraphTooBig { size: n })
    }
}
