use log::{debug, info, trace, warn};

use crate::cli::{Operand, Options};
use crate::error::Result;
use crate::source::ByteSource;

/// Bytes pulled from each source per round.
pub const BUFFER_CAPACITY: usize = 512 * 64;

/// Everything needed for one comparison.
#[derive(Debug)]
pub struct CompareRequest {
    pub source_a: ByteSource,
    pub source_b: ByteSource,
    pub offset_a: u64,
    pub offset_b: u64,
    /// `None` (or `Some(0)`) compares until either source runs dry.
    pub max_len: Option<u64>,
}

impl CompareRequest {
    pub fn new(source_a: ByteSource, source_b: ByteSource) -> Self {
        Self {
            source_a,
            source_b,
            offset_a: 0,
            offset_b: 0,
            max_len: None,
        }
    }

    pub fn offsets(mut self, offset_a: u64, offset_b: u64) -> Self {
        self.offset_a = offset_a;
        self.offset_b = offset_b;
        self
    }

    pub fn max_len(mut self, max_len: Option<u64>) -> Self {
        self.max_len = max_len;
        self
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareResult {
    pub bytes_compared: u64,
    pub bits_compared: u64,
    pub byte_diff_count: u64,
    pub bit_diff_count: u64,
}

impl CompareResult {
    pub fn bytes_equal(&self) -> u64 {
        self.bytes_compared - self.byte_diff_count
    }

    pub fn bits_equal(&self) -> u64 {
        self.bits_compared - self.bit_diff_count
    }

    /// Share of differing bytes, or `None` when nothing was compared.
    pub fn byte_diff_ratio(&self) -> Option<f64> {
        ratio(self.byte_diff_count, self.bytes_compared)
    }

    pub fn byte_equal_ratio(&self) -> Option<f64> {
        ratio(self.bytes_equal(), self.bytes_compared)
    }

    pub fn bit_diff_ratio(&self) -> Option<f64> {
        ratio(self.bit_diff_count, self.bits_compared)
    }

    pub fn bit_equal_ratio(&self) -> Option<f64> {
        ratio(self.bits_equal(), self.bits_compared)
    }
}

fn ratio(part: u64, whole: u64) -> Option<f64> {
    (whole != 0).then(|| part as f64 / whole as f64)
}

/// Difference counts for one chunk, before they are folded into a result.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDiff {
    pub byte_diffs: u64,
    pub bit_diffs: u64,
}

/// Counts differing bytes and bits between two equally long slices.
///
/// Whole 8-byte blocks are XORed as `u64` words; the leftover tail is
/// handled byte by byte. Both sides of a block are loaded with the same
/// byte order, so the counts do not depend on the host architecture.
pub fn diff_chunk(a: &[u8], b: &[u8]) -> ChunkDiff {
    debug_assert_eq!(a.len(), b.len());

    let mut diff = ChunkDiff::default();
    let blocks_a = a.chunks_exact(8);
    let blocks_b = b.chunks_exact(8);
    let (tail_a, tail_b) = (blocks_a.remainder(), blocks_b.remainder());

    for (wa, wb) in blocks_a.zip(blocks_b) {
        let xor = load_word(wa) ^ load_word(wb);
        if xor != 0 {
            diff.byte_diffs += nonzero_lanes(xor);
            diff.bit_diffs += u64::from(xor.count_ones());
        }
    }

    for (&x, &y) in tail_a.iter().zip(tail_b) {
        let xor = x ^ y;
        diff.byte_diffs += u64::from(xor != 0);
        diff.bit_diffs += u64::from(xor.count_ones());
    }

    diff
}

fn load_word(block: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(block);
    u64::from_le_bytes(word)
}

// A byte lane can differ by a single bit, so the word popcount alone does
// not say how many lanes are non-zero.
fn nonzero_lanes(xor: u64) -> u64 {
    xor.to_le_bytes().iter().filter(|&&lane| lane != 0).count() as u64
}

/// Streams two sources through fixed-size buffers and accumulates a
/// [`CompareResult`].
#[derive(Debug)]
pub struct StreamComparator {
    request: CompareRequest,
    capacity: usize,
}

impl StreamComparator {
    pub fn new(request: CompareRequest) -> Self {
        Self::with_capacity(request, BUFFER_CAPACITY)
    }

    /// Uses `capacity` bytes per source and round instead of
    /// [`BUFFER_CAPACITY`]. A capacity of zero is bumped to one.
    pub fn with_capacity(request: CompareRequest, capacity: usize) -> Self {
        Self {
            request,
            capacity: capacity.max(1),
        }
    }

    pub fn run(self) -> Result<CompareResult> {
        let CompareRequest {
            mut source_a,
            mut source_b,
            offset_a,
            offset_b,
            max_len,
        } = self.request;
        let max_len = max_len.filter(|&n| n != 0);

        debug!(
            "comparing {} @ {} with {} @ {}, max_len {:?}",
            source_a.name(),
            offset_a,
            source_b.name(),
            offset_b,
            max_len
        );

        source_a.seek(offset_a)?;
        source_b.seek(offset_b)?;

        let mut buf_a = vec![0u8; self.capacity];
        let mut buf_b = vec![0u8; self.capacity];

        let mut bytes_compared: u64 = 0;
        let mut byte_diff_count: u64 = 0;
        let mut bit_diff_count: u64 = 0;

        loop {
            let want = match max_len {
                Some(cap) => {
                    let remaining = cap - bytes_compared;
                    if remaining == 0 {
                        debug!("length cap of {cap} bytes reached");
                        break;
                    }
                    usize::try_from(remaining).map_or(self.capacity, |r| r.min(self.capacity))
                }
                None => self.capacity,
            };

            let count_a = source_a.fill(&mut buf_a[..want])?;
            let count_b = source_b.fill(&mut buf_b[..want])?;
            let usable = count_a.min(count_b);
            if usable == 0 {
                debug!("end of data after {bytes_compared} bytes");
                break;
            }

            let chunk = diff_chunk(&buf_a[..usable], &buf_b[..usable]);
            trace!(
                "chunk at +{bytes_compared}: {usable} bytes, {} byte diffs, {} bit diffs",
                chunk.byte_diffs,
                chunk.bit_diffs
            );

            byte_diff_count += chunk.byte_diffs;
            bit_diff_count += chunk.bit_diffs;
            bytes_compared += usable as u64;
        }

        Ok(CompareResult {
            bytes_compared,
            bits_compared: 8 * bytes_compared,
            byte_diff_count,
            bit_diff_count,
        })
    }
}

/// Opens the operands described by `opts` and compares them.
pub fn run_diffcount(opts: &Options) -> Result<CompareResult> {
    let source_a = ByteSource::open(&opts.file1)?;
    let source_b = match &opts.operand {
        Operand::File(path) => ByteSource::open(path)?,
        Operand::Constant(value) => {
            if opts.skip2 != 0 {
                debug!("skip2 = {} has no effect on a constant operand", opts.skip2);
            }
            ByteSource::constant(*value)
        }
    };

    for source in [&source_a, &source_b] {
        if let Some(len) = source.len() {
            info!("{}: {} bytes", source.name(), len);
        }
    }

    let request = CompareRequest::new(source_a, source_b)
        .offsets(opts.skip1, opts.skip2)
        .max_len(opts.max_len);
    let result = StreamComparator::new(request).run()?;

    if result.bytes_compared == 0 {
        warn!("no bytes were compared");
    }
    Ok(result)
}
