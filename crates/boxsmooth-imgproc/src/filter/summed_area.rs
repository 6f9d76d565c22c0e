use boxsmooth_image::{Image, ImageSize};

/// Per-channel summed-area table of an 8-bit image.
///
/// Entry `(y, x, c)` of the `(H + 1) x (W + 1) x C` table holds the sum of
/// channel `c` over all source pixels above and to the left of `(x, y)`,
/// exclusive. The first row and column are zero.
pub(crate) struct SummedAreaTable<const C: usize> {
    data: Vec<u64>,
    stride: usize,
}

impl<const C: usize> SummedAreaTable<C> {
    pub(crate) fn new(src: &Image<u8, C>) -> Self {
        let ImageSize { width, height } = src.size();
        let stride = (width + 1) * C;
        let mut data = vec![0u64; (height + 1) * stride];
        let src_data = src.as_slice();

        for y in 0..height {
            let mut row_acc = [0u64; C];
            let src_row = &src_data[y * width * C..(y + 1) * width * C];
            let (above, below) = data.split_at_mut((y + 1) * stride);
            let prev = &above[y * stride..];
            let curr = &mut below[..stride];

            for (x, px) in src_row.chunks_exact(C).enumerate() {
                let idx = (x + 1) * C;
                for ch in 0..C {
                    row_acc[ch] += px[ch] as u64;
                    curr[idx + ch] = prev[idx + ch] + row_acc[ch];
                }
            }
        }

        Self { data, stride }
    }

    #[inline]
    fn at(&self, y: usize, x: usize, ch: usize) -> u64 {
        self.data[y * self.stride + x * C + ch]
    }

    /// Sum of channel `ch` over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    #[inline]
    pub(crate) fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize, ch: usize) -> u64 {
        // a + d >= b + c holds for prefix sums of non-negative values
        let a = self.at(y1 + 1, x1 + 1, ch);
        let b = self.at(y0, x1 + 1, ch);
        let c = self.at(y1 + 1, x0, ch);
        let d = self.at(y0, x0, ch);
        (a + d) - (b + c)
    }
}
