//! Hand-drawn 8x8 pictograms for the emoji, decorations and currency signs that the console font
//! lacks, so that every palette entry is recognisable with the built-in face.

/// Turns eight rows of `#` (ink) and `.` (blank), leftmost pixel first, into font8x8 row bytes.
const fn glyph(rows: [&[u8; 8]; 8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    let mut row = 0;
    while row < 8 {
        let mut col = 0;
        while col < 8 {
            if rows[row][col] == b'#' {
                out[row] |= 1 << col;
            }
            col += 1;
        }
        row += 1;
    }
    out
}

const PICTOGRAMS: &[(char, [u8; 8])] = &[
    // smiling face
    (
        '😊',
        glyph([
            b"..####..",
            b".#....#.",
            b"#.#..#.#",
            b"#......#",
            b"#.#..#.#",
            b"#..##..#",
            b".#....#.",
            b"..####..",
        ]),
    ),
    // rolling on the floor laughing
    (
        '🤣',
        glyph([
            b"..####..",
            b".#....#.",
            b"#.#..#.#",
            b"#......#",
            b"#.####.#",
            b"#.#..#.#",
            b".#.##.#.",
            b"..####..",
        ]),
    ),
    // money with wings
    (
        '💸',
        glyph([
            b"#......#",
            b"##.##.##",
            b".######.",
            b".#.##.#.",
            b".##..##.",
            b".#.##.#.",
            b".######.",
            b"........",
        ]),
    ),
    // loudly crying face
    (
        '😭',
        glyph([
            b"..####..",
            b".#....#.",
            b"#.#..#.#",
            b"##....##",
            b"##.##.##",
            b"##.##.##",
            b".##..##.",
            b"..####..",
        ]),
    ),
    // fire
    (
        '🔥',
        glyph([
            b"...#....",
            b"...##...",
            b"..###.#.",
            b".#####..",
            b".######.",
            b"########",
            b"########",
            b".######.",
        ]),
    ),
    // money-mouth face
    (
        '🤑',
        glyph([
            b"..####..",
            b".#....#.",
            b"##.##.##",
            b"#.#..#.#",
            b"##.##.##",
            b"#......#",
            b".#.##.#.",
            b"..####..",
        ]),
    ),
    // exploding head
    (
        '🤯',
        glyph([
            b"#.#..#.#",
            b".#.##.#.",
            b"#..##..#",
            b"..####..",
            b".#....#.",
            b"#.#..#.#",
            b"#..##..#",
            b".######.",
        ]),
    ),
    // face with peeking eye
    (
        '🫣',
        glyph([
            b"..####..",
            b".#....#.",
            b"#####..#",
            b"#.#.##.#",
            b"#####..#",
            b"#.#..#.#",
            b".#....#.",
            b"..####..",
        ]),
    ),
    // performing arts
    (
        '🎭',
        glyph([
            b"######..",
            b"#.##.#..",
            b"######..",
            b"#.##.###",
            b".#..##.#",
            b"..####.#",
            b"....#..#",
            b".....##.",
        ]),
    ),
    // sparkles
    (
        '✨',
        glyph([
            b"...#....",
            b"...#....",
            b"..###...",
            b"#######.",
            b"..###...",
            b"...#..#.",
            b"...#.###",
            b"......#.",
        ]),
    ),
    // collision
    (
        '💥',
        glyph([
            b"#..#..#.",
            b".#.#.#..",
            b"..###...",
            b"#######.",
            b"..###...",
            b".#.#.#..",
            b"#..#..#.",
            b"........",
        ]),
    ),
    // direct hit
    (
        '🎯',
        glyph([
            b".######.",
            b"#......#",
            b"#.#..#.#",
            b"#.####.#",
            b"#.####.#",
            b"#.#..#.#",
            b"#......#",
            b".######.",
        ]),
    ),
    // chart increasing
    (
        '📈',
        glyph([
            b"#.......",
            b"#.....##",
            b"#....#.#",
            b"#...#...",
            b"#.##....",
            b"##......",
            b"#.......",
            b"########",
        ]),
    ),
    // chart decreasing
    (
        '📉',
        glyph([
            b"#.......",
            b"##......",
            b"#.##....",
            b"#...#...",
            b"#....#.#",
            b"#.....##",
            b"#.......",
            b"########",
        ]),
    ),
    // gem stone
    (
        '💎',
        glyph([
            b".######.",
            b"#.#..#.#",
            b"########",
            b".#....#.",
            b"..#..#..",
            b"...##...",
            b"........",
            b"........",
        ]),
    ),
    // crown
    (
        '👑',
        glyph([
            b"........",
            b"#..##..#",
            b"##.##.##",
            b"########",
            b"#.#..#.#",
            b"########",
            b"........",
            b"........",
        ]),
    ),
    // rupee sign
    (
        '₹',
        glyph([
            b".######.",
            b"....#...",
            b".######.",
            b"....#...",
            b".###....",
            b"..##....",
            b"...##...",
            b"....##..",
        ]),
    ),
];

/// The pictogram drawn for `c`, if there is one.
pub(crate) fn pictogram(c: char) -> Option<[u8; 8]> {
    PICTOGRAMS
        .iter()
        .find(|(p, _)| *p == c)
        .map(|(_, bitmap)| *bitmap)
}
