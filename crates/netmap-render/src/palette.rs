/// Plotly's `Set1` qualitative palette.
pub const SET1: [&str; 9] = [
    "rgb(228,26,28)",
    "rgb(55,126,184)",
    "rgb(77,175,74)",
    "rgb(152,78,163)",
    "rgb(255,127,0)",
    "rgb(255,255,51)",
    "rgb(166,86,40)",
    "rgb(247,129,191)",
    "rgb(153,153,153)",
];

/// Color for community `label`, wrapping around once the palette runs out.
pub fn community_color(label: usize) -> &'static str {
    SET1[label % SET1.len()]
}
