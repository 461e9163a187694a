/// Grey level of each entry of the system grayscale palette. Every entry has `r == g == b`.
///
/// Filler slots are pure white.
#[rustfmt::skip]
pub(super) const GREYSCALE_LEVELS: [u8; 256] = [
    255, 254, 255, 253, 252, 251, 250, 249, 248, 247, 246, 245, 244, 243, 255, 242,
    241, 240, 239, 238, 237, 236, 235, 234, 233, 232, 255, 231, 230, 229, 228, 227,
    223, 222, 255, 221, 220, 219, 218, 217, 216, 215, 214, 213, 212, 211, 255, 210,
    209, 208, 207, 206, 205, 204, 203, 202, 201, 200, 255, 199, 198, 197, 196, 195,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
    191, 190, 255, 189, 188, 187, 186, 185, 184, 183, 182, 181, 180, 179, 255, 178,
    177, 176, 175, 174, 173, 172, 171, 170, 169, 168, 255, 167, 166, 165, 164, 163,
    159, 158, 255, 157, 156, 155, 154, 153, 152, 151, 150, 149, 148, 147, 255, 146,
    145, 144, 143, 142, 141, 140, 139, 138, 137, 136, 255, 135, 134, 133, 132, 131,
    127, 126, 255, 125, 124, 123, 122, 121, 120, 119, 118, 117, 116, 115, 255, 114,
    113, 112, 111, 110, 109, 108, 107, 106, 105, 104, 255, 103, 102, 101, 100, 99,
    95, 94, 255, 93, 92, 91, 90, 89, 88, 87, 86, 85, 84, 83, 255, 82,
    81, 80, 79, 78, 77, 76, 75, 74, 73, 72, 255, 71, 70, 69, 68, 67,
    63, 62, 255, 61, 60, 59, 58, 57, 56, 55, 54, 53, 52, 51, 255, 50,
    49, 48, 47, 46, 45, 44, 43, 42, 41, 40, 255, 39, 38, 37, 36, 35,
];
