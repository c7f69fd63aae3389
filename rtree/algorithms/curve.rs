//! 空间填充曲线编码
//!
//! 把 16 位网格上的坐标 (x, y) 映射为 32 位曲线序号，二维上相近的点在一维序号上也倾向于相近。
//! 曲线排序构建算法用这些序号给条目排序。

/// 网格每个轴的最大坐标
pub const GRID_MAX: u16 = u16::MAX;

/// 把每个 bit 之间插入一个 0：`abcd` -> `0a0b0c0d`
fn interleave(value: u16) -> u32 {
    let mut x = value as u32;
    x = (x | (x << 8)) & 0x00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333;
    x = (x | (x << 1)) & 0x5555_5555;
    x
}

/// Morton（Z-order）编码：x 占偶数位，y 占奇数位
pub fn encode_morton(x: u16, y: u16) -> u32 {
    interleave(x) | (interleave(y) << 1)
}

/// Hilbert 曲线编码
///
/// 无分支的前缀扫描实现（rawrunprotected/hilbert_curves，公有领域），固定 16 阶。
pub fn encode_hilbert(x: u16, y: u16) -> u32 {
    let x = x as u32;
    let y = y as u32;

    let mut a = x ^ y;
    let mut b = 0xFFFF ^ a;
    let mut c = 0xFFFF ^ (x | y);
    let mut d = x & (y ^ 0xFFFF);

    let mut aa = a | (b >> 1);
    let mut bb = (a >> 1) ^ a;
    let mut cc = ((c >> 1) ^ (b & (d >> 1))) ^ c;
    let mut dd = ((a & (c >> 1)) ^ (d >> 1)) ^ d;

    for shift in [2u32, 4] {
        a = aa;
        b = bb;
        c = cc;
        d = dd;
        aa = (a & (a >> shift)) ^ (b & (b >> shift));
        bb = (a & (b >> shift)) ^ (b & ((a ^ b) >> shift));
        cc ^= (a & (c >> shift)) ^ (b & (d >> shift));
        dd ^= (b & (c >> shift)) ^ ((a ^ b) & (d >> shift));
    }

    a = aa;
    b = bb;
    c = cc;
    d = dd;
    cc ^= (a & (c >> 8)) ^ (b & (d >> 8));
    dd ^= (b & (c >> 8)) ^ ((a ^ b) & (d >> 8));

    // 撤销前缀扫描，恢复序号的各个 bit
    a = cc ^ (cc >> 1);
    b = dd ^ (dd >> 1);

    let i0 = x ^ y;
    let i1 = b | (0xFFFF ^ (i0 | a));

    (interleave(i1 as u16) << 1) | interleave(i0 as u16)
}

/// 把坐标按给定范围量化到 `[0, GRID_MAX]`
///
/// 范围宽度为 0（所有条目在该轴上坐标相同）时返回 0。
pub(crate) fn quantize(value: f64, min: f64, width: f64) -> u16 {
    if width <= 0.0 || !width.is_finite() {
        return 0;
    }
    let scaled = ((value - min) / width * GRID_MAX as f64).floor();
    scaled.clamp(0.0, GRID_MAX as f64) as u16
}
