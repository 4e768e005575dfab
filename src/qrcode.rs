#![forbid(unsafe_code)]
//! QR symbol encoding.
//!
//! Turns a text payload into a QR Code Model 2 module matrix. Payloads are always
//! encoded in 8-bit byte mode, at the smallest version (1–40) that holds them, with
//! the mask pattern that scores the lowest penalty unless one is forced through
//! [`SymbolOptions::mask`].
//!
//! # Example
//!
//! ```rust
//! use vcardqr::qrcode::{encode, SymbolOptions};
//!
//! let symbol = encode("Hello, World!", &SymbolOptions::default()).unwrap();
//! assert_eq!(symbol.version().value(), 1);
//! assert_eq!(symbol.size(), 21);
//! ```

use crate::error::EncodingError;

/// Parameters for encoding a symbol and for rendering it afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolOptions {
    /// Error correction level of the symbol.
    pub error_correction: ErrorCorrection,
    /// Side length of one module in the rendered image, in pixels.
    pub module_size: u32,
    /// Width of the light border around the symbol, in modules.
    pub quiet_zone: u32,
    /// Smallest version the encoder may pick.
    pub min_version: Version,
    /// Forced mask pattern, or `None` to pick the lowest-penalty one.
    pub mask: Option<Mask>,
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Low,
            module_size: 10,
            quiet_zone: 4,
            min_version: Version::MIN,
            mask: None,
        }
    }
}

/// A QR Code symbol: a square grid of dark (`true`) and light (`false`) modules.
///
/// Instances are immutable after [`encode`] returns them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Width and height in modules, between 21 and 177 (inclusive).
    size: i32,
    version: Version,
    mask: Mask,
    /// Row-major module colors.
    modules: Vec<bool>,
}

impl Symbol {
    /// Returns this symbol's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this symbol's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the mask pattern applied to the data region.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the
    /// symbol's bounds return `false`, so a quiet zone can be drawn by simply iterating past
    /// the edges.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size;
        range.contains(&x) && range.contains(&y) && self.modules[(y * self.size + x) as usize]
    }

    /// Returns all modules in row-major order.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Decodes the format information drawn next to the top-left finder pattern.
    ///
    /// Returns `None` if the 15 format bits fail their BCH check.
    pub fn read_format(&self) -> Option<(ErrorCorrection, Mask)> {
        let mut bits: u32 = 0;
        for i in 0..6 {
            bits |= u32::from(self.module(8, i)) << i;
        }
        bits |= u32::from(self.module(8, 7)) << 6;
        bits |= u32::from(self.module(8, 8)) << 7;
        bits |= u32::from(self.module(7, 8)) << 8;
        for i in 9..15 {
            bits |= u32::from(self.module(14 - i, 8)) << i;
        }
        let data = (bits ^ FORMAT_XOR_MASK) >> 10;
        if format_word(data) != bits {
            return None;
        }
        let ecl = ErrorCorrection::from_format_bits(data >> 3)?;
        Some((ecl, Mask::new((data & 7) as u8)))
    }
}

/// Encodes the UTF-8 bytes of `text` into a QR symbol.
///
/// The smallest version at or above `options.min_version` that can hold the payload is chosen.
///
/// # Errors
///
/// Returns [`EncodingError::DataTooLong`] if the payload does not fit in a version 40 symbol
/// at the requested error correction level.
pub fn encode(text: &str, options: &SymbolOptions) -> Result<Symbol, EncodingError> {
    let data: &[u8] = text.as_bytes();
    let ecl = options.error_correction;
    let version = select_version(data.len(), ecl, options.min_version)?;

    let datacodewords = make_data_codewords(data, version, ecl);
    let allcodewords = add_ecc_and_interleave(&datacodewords, version, ecl);

    let mut matrix = Matrix::new(version);
    matrix.draw_function_patterns(ecl);
    matrix.draw_codewords(&allcodewords);

    let mask = match options.mask {
        Some(mask) => mask,
        None => matrix.choose_mask(ecl),
    };
    matrix.apply_mask(mask);
    matrix.draw_format_bits(ecl, mask);

    Ok(Symbol {
        size: matrix.size,
        version,
        mask,
        modules: matrix.modules,
    })
}

/// Returns the smallest version, starting at `minversion`, whose byte-mode capacity holds
/// `len` bytes.
///
/// # Errors
///
/// Returns [`EncodingError::DataTooLong`] if even [`Version::MAX`] is too small.
pub fn select_version(
    len: usize,
    ecl: ErrorCorrection,
    minversion: Version
) -> Result<Version, EncodingError> {
    let mut version: Version = minversion;
    loop {
        let datacapacitybits: usize = num_data_codewords(version, ecl) * 8;
        if byte_segment_bits(len, version).is_some_and(|n| n <= datacapacitybits) {
            return Ok(version);
        }
        if version >= Version::MAX {
            return Err(EncodingError::DataTooLong {
                bytes: len,
                capacity: byte_capacity(Version::MAX, ecl),
            });
        }
        version = Version::new(version.value() + 1);
    }
}

/// Returns how many payload bytes a byte-mode symbol of this version and level can carry.
pub fn byte_capacity(version: Version, ecl: ErrorCorrection) -> usize {
    let ccbits: u8 = num_char_count_bits(version);
    let bits: usize = num_data_codewords(version, ecl) * 8 - 4 - usize::from(ccbits);
    (bits / 8).min((1usize << ccbits) - 1)
}

/// Number of bits a byte-mode segment of `len` bytes occupies, or `None` if `len` overflows
/// the character count field.
fn byte_segment_bits(len: usize, version: Version) -> Option<usize> {
    let ccbits: u8 = num_char_count_bits(version);
    if len >= 1usize << ccbits {
        return None;
    }
    len.checked_mul(8)?.checked_add(4 + usize::from(ccbits))
}

fn num_char_count_bits(version: Version) -> u8 {
    if version.value() <= 9 { 8 } else { 16 }
}

fn make_data_codewords(data: &[u8], version: Version, ecl: ErrorCorrection) -> Vec<u8> {
    let datacapacitybits: usize = num_data_codewords(version, ecl) * 8;
    let mut bb = BitBuffer::with_capacity(datacapacitybits / 8);
    bb.append_bits(BYTE_MODE_INDICATOR, 4);
    // select_version has already bounded the length by the count field width
    bb.append_bits(data.len() as u32, num_char_count_bits(version));
    for &b in data {
        bb.append_bits(u32::from(b), 8);
    }
    debug_assert!(bb.len() <= datacapacitybits);

    // Add terminator and pad up to a byte if applicable
    let numzerobits: usize = core::cmp::min(4, datacapacitybits - bb.len());
    bb.append_bits(0, numzerobits as u8);
    let numzerobits: usize = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, numzerobits as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in [0xec, 0x11].iter().cycle() {
        if bb.len() >= datacapacitybits {
            break;
        }
        bb.append_bits(padbyte, 8);
    }
    bb.into_bytes()
}

/// Splits the data codewords into blocks, appends each block's Reed-Solomon remainder and
/// interleaves the result in transmission order.
fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: ErrorCorrection) -> Vec<u8> {
    debug_assert_eq!(data.len(), num_data_codewords(ver, ecl));
    let numblocks: usize = ecl.num_blocks(ver);
    let blockecclen: usize = ecl.ecc_codewords_per_block(ver);
    let rawcodewords: usize = num_raw_data_modules(ver) / 8;
    let numshortblocks: usize = numblocks - (rawcodewords % numblocks);
    let shortblockdatalen: usize = rawcodewords / numblocks - blockecclen;

    let rs = ReedSolomonGenerator::new(blockecclen);
    let mut result = vec![0u8; rawcodewords];
    let mut ecc = vec![0u8; blockecclen];
    let mut dat: &[u8] = data;
    for i in 0..numblocks {
        let datlen: usize = shortblockdatalen + usize::from(i >= numshortblocks);
        rs.compute_remainder(&dat[..datlen], &mut ecc);
        let mut k: usize = i;
        for (j, &b) in dat[..datlen].iter().enumerate() {
            if j == shortblockdatalen {
                k -= numshortblocks;
            }
            result[k] = b;
            k += numblocks;
        }
        let mut k: usize = data.len() + i;
        for &b in &ecc {
            result[k] = b;
            k += numblocks;
        }
        dat = &dat[datlen..];
    }
    debug_assert_eq!(dat.len(), 0);
    result
}

/// Number of data bits available in a symbol of this version, after all function modules
/// are excluded. Includes remainder bits, so it may not be a multiple of 8.
fn num_raw_data_modules(ver: Version) -> usize {
    let ver = usize::from(ver.value());
    let mut result: usize = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign: usize = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

fn num_data_codewords(ver: Version, ecl: ErrorCorrection) -> usize {
    num_raw_data_modules(ver) / 8 - ecl.ecc_codewords_per_block(ver) * ecl.num_blocks(ver)
}

/// Ascending center coordinates of the alignment patterns for this version.
fn alignment_pattern_positions(version: Version) -> Vec<i32> {
    let ver = i32::from(version.value());
    if ver == 1 {
        return Vec::new();
    }
    let size: i32 = ver * 4 + 17;
    let numalign: i32 = ver / 7 + 2;
    let step: i32 = if ver == 32 {
        26
    } else {
        ((ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2)) * 2
    };
    let mut result: Vec<i32> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

/// Full 15-bit format word (BCH code, masked) for the 5 data bits.
fn format_word(data: u32) -> u32 {
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ FORMAT_XOR_MASK
}

fn format_bits(ecl: ErrorCorrection, mask: Mask) -> u32 {
    format_word(u32::from((ecl.format_bits() << 3) | mask.value()))
}

/// 18-bit version information word (BCH code) for versions 7 and up.
fn version_bits(version: Version) -> u32 {
    let ver = u32::from(version.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
    }
    (ver << 12) | rem
}

/// Working grid used while a symbol is being built.
struct Matrix {
    size: i32,
    version: Version,
    modules: Vec<bool>,
    /// Marks finder, timing, alignment, format and version modules, which masking skips.
    isfunction: Vec<bool>,
}

impl Matrix {
    fn new(version: Version) -> Self {
        let size: i32 = i32::from(version.value()) * 4 + 17;
        let len = (size * size) as usize;
        Self {
            size,
            version,
            modules: vec![false; len],
            isfunction: vec![false; len],
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!((0..self.size).contains(&x) && (0..self.size).contains(&y));
        (y * self.size + x) as usize
    }

    fn get(&self, x: i32, y: i32) -> bool {
        self.modules[self.index(x, y)]
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        let index = self.index(x, y);
        self.modules[index] = isdark;
        self.isfunction[index] = true;
    }

    fn draw_function_patterns(&mut self, ecl: ErrorCorrection) {
        let size: i32 = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        // Skip the three corners already covered by finder patterns
        let alignpatpos = alignment_pattern_positions(self.version);
        let last: usize = alignpatpos.len().saturating_sub(1);
        for (i, &pos0) in alignpatpos.iter().enumerate() {
            for (j, &pos1) in alignpatpos.iter().enumerate() {
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                self.draw_alignment_pattern(pos0, pos1);
            }
        }

        // Reserve the format area; the real bits are written once the mask is known
        self.draw_format_bits(ecl, Mask::new(0));
        self.draw_version();
    }

    /// Draws a finder pattern plus its separator, clipped to the symbol bounds.
    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let (xx, yy) = (x + dx, y + dy);
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist: i32 = dx.abs().max(dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                self.set_function_module(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    fn draw_format_bits(&mut self, ecl: ErrorCorrection, mask: Mask) {
        let bits: u32 = format_bits(ecl, mask);
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }
        let size: i32 = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let bits: u32 = version_bits(self.version);
        for i in 0..18 {
            let bit: bool = get_bit(bits, i);
            let a: i32 = self.size - 11 + i % 3;
            let b: i32 = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    /// Places the codeword bits in zig-zag column pairs, right to left, skipping function
    /// modules. Remainder bits stay light.
    fn draw_codewords(&mut self, data: &[u8]) {
        debug_assert_eq!(data.len(), num_raw_data_modules(self.version) / 8);
        let size: i32 = self.size;
        let totalbits: usize = data.len() * 8;
        let mut i: usize = 0;
        let mut right: i32 = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward: bool = ((right + 1) & 2) == 0;
            for vert in 0..size {
                let y: i32 = if upward { size - 1 - vert } else { vert };
                for j in 0..2 {
                    let index = self.index(right - j, y);
                    if !self.isfunction[index] && i < totalbits {
                        self.modules[index] = get_bit(u32::from(data[i >> 3]), 7 - (i & 7) as i32);
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, totalbits);
    }

    /// XORs the mask into every non-function module. Applying the same mask twice undoes it.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let index = self.index(x, y);
                if !self.isfunction[index] && mask.inverts(x, y) {
                    self.modules[index] = !self.modules[index];
                }
            }
        }
    }

    fn choose_mask(&mut self, ecl: ErrorCorrection) -> Mask {
        let mut best = Mask::new(0);
        let mut minpenalty = i32::MAX;
        for i in 0u8..8 {
            let mask = Mask::new(i);
            self.apply_mask(mask);
            self.draw_format_bits(ecl, mask);
            let penalty: i32 = self.penalty_score();
            if penalty < minpenalty {
                best = mask;
                minpenalty = penalty;
            }
            self.apply_mask(mask);
        }
        best
    }

    fn penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size: i32 = self.size;

        // Adjacent modules in row having same color, and finder-like patterns
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.get(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.get(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        // Same for columns
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.get(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.get(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // 2*2 blocks of modules having same color
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color: bool = self.get(x, y);
                if
                    color == self.get(x + 1, y) &&
                    color == self.get(x, y + 1) &&
                    color == self.get(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Balance of dark and light modules
        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total: i32 = size * size;
        let k: i32 = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        result += k * PENALTY_N4;
        result
    }
}

struct ReedSolomonGenerator {
    /// Generator polynomial coefficients, highest degree first, leading 1 omitted.
    divisor: Vec<u8>,
}

impl ReedSolomonGenerator {
    fn new(degree: usize) -> Self {
        debug_assert!((1..=255).contains(&degree), "Degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;
        // Multiply by (x - r^0)(x - r^1)...(x - r^(degree-1)) where r = 0x02
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Self::multiply(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Self::multiply(root, 0x02);
        }
        Self { divisor }
    }

    fn compute_remainder(&self, data: &[u8], result: &mut [u8]) {
        debug_assert_eq!(result.len(), self.divisor.len());
        result.fill(0);
        for b in data {
            let factor: u8 = b ^ result[0];
            result.copy_within(1.., 0);
            result[result.len() - 1] = 0;
            for (x, &y) in result.iter_mut().zip(self.divisor.iter()) {
                *x ^= Self::multiply(y, factor);
            }
        }
    }

    /// Product of two field elements modulo GF(2^8/0x11D).
    fn multiply(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * 0x1d);
            z ^= ((y >> i) & 1) * x;
        }
        z
    }
}

struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self {
            qr_size: size,
            run_history: [0; 7],
        }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size; // Add light border to initial run
        }
        let len: usize = self.run_history.len();
        self.run_history.copy_within(0..len - 1, 1);
        self.run_history[0] = currentrunlength;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        // dark:light:dark:light:dark = 1:1:3:1:1, light 4n on one side and at least n on the other
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n) +
            i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size; // Add light border to final run
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

const BYTE_MODE_INDICATOR: u32 = 0x4;
const FORMAT_XOR_MASK: u32 = 0x5412;

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

// Index 0 is padding so the tables can be indexed by version number
static ECC_CODEWORDS_PER_BLOCK_LOW: [u8; 41] = [
    0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
    30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
];

static NUM_ERROR_CORRECTION_BLOCKS_LOW: [u8; 41] = [
    0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
    13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
];

/// Error correction level of a symbol.
///
/// Only the lowest level is produced; it maximizes payload capacity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum ErrorCorrection {
    /// Tolerates ~7% erroneous codewords.
    #[default]
    Low,
}

impl ErrorCorrection {
    /// Returns the 2-bit value written into the format information.
    fn format_bits(self) -> u8 {
        match self {
            Self::Low => 1,
        }
    }

    fn from_format_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::Low),
            _ => None,
        }
    }

    fn ecc_codewords_per_block(self, ver: Version) -> usize {
        match self {
            Self::Low => usize::from(ECC_CODEWORDS_PER_BLOCK_LOW[usize::from(ver.value())]),
        }
    }

    fn num_blocks(self, ver: Version) -> usize {
        match self {
            Self::Low => usize::from(NUM_ERROR_CORRECTION_BLOCKS_LOW[usize::from(ver.value())]),
        }
    }
}

/// Append-only bit sequence, most significant bit first.
struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            length: 0,
        }
    }

    fn len(&self) -> usize {
        self.length
    }

    fn append_bits(&mut self, val: u32, len: u8) {
        debug_assert!(len <= 31 && (val >> len) == 0);
        for i in (0..len).rev() {
            if self.length % 8 == 0 {
                self.data.push(0);
            }
            let shift: usize = 7 - (self.length & 7);
            if let Some(last) = self.data.last_mut() {
                *last |= (((val >> i) & 1) as u8) << shift;
            }
            self.length += 1;
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the side length in modules of a symbol of this version.
    pub const fn size(self) -> i32 {
        (self.0 as i32) * 4 + 17
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    fn inverts(self, x: i32, y: i32) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => ((x * y) % 2) + ((x * y) % 3) == 0,
            6 => (((x * y) % 2) + ((x * y) % 3)) % 2 == 0,
            7 => (((x + y) % 2) + ((x * y) % 3)) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

fn get_bit(x: u32, i: i32) -> bool {
    ((x >> i) & 1) != 0
}
