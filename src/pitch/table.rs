//! The fixed table of well-known pitches, C-1 through B10.
//!
//! Frequencies follow scientific pitch notation (A4 = 440 Hz). Index `i`
//! in the table is MIDI note `i` for the first 128 entries; pitches above
//! G9 have no MIDI id.

use super::Pitch;

const fn known(name: &'static str, hertz: f64, midi_id: Option<u8>) -> Pitch {
    Pitch::known(name, hertz, midi_id)
}

pub(super) static KNOWN_PITCHES: [Pitch; 144] = [
    known("C-1", 8.175799, Some(0)),
    known("C♯/D♭-1", 8.661957, Some(1)),
    known("D-1", 9.177024, Some(2)),
    known("E♭/D♯-1", 9.722718, Some(3)),
    known("E-1", 10.30086, Some(4)),
    known("F-1", 10.91338, Some(5)),
    known("F♯/G♭-1", 11.56233, Some(6)),
    known("G-1", 12.24986, Some(7)),
    known("A♭/G♯-1", 12.97827, Some(8)),
    known("A-1", 13.75000, Some(9)),
    known("B♭/A♯-1", 14.56762, Some(10)),
    known("B-1", 15.43385, Some(11)),
    known("C0", 16.35160, Some(12)),
    known("C♯/D♭0", 17.32391, Some(13)),
    known("D0", 18.35405, Some(14)),
    known("E♭/D♯0", 19.44544, Some(15)),
    known("E0", 20.60172, Some(16)),
    known("F0", 21.82676, Some(17)),
    known("F♯/G♭0", 23.12465, Some(18)),
    known("G0", 24.49971, Some(19)),
    known("A♭/G♯0", 25.95654, Some(20)),
    known("A0", 27.50000, Some(21)),
    known("B♭/A♯0", 29.13524, Some(22)),
    known("B0", 30.86771, Some(23)),
    known("C1", 32.70320, Some(24)),
    known("C♯/D♭1", 34.64783, Some(25)),
    known("D1", 36.70810, Some(26)),
    known("E♭/D♯1", 38.89087, Some(27)),
    known("E1", 41.20344, Some(28)),
    known("F1", 43.65353, Some(29)),
    known("F♯/G♭1", 46.24930, Some(30)),
    known("G1", 48.99943, Some(31)),
    known("A♭/G♯1", 51.91309, Some(32)),
    known("A1", 55.00000, Some(33)),
    known("B♭/A♯1", 58.27047, Some(34)),
    known("B1", 61.73541, Some(35)),
    known("C2", 65.40639, Some(36)),
    known("C♯/D♭2", 69.29566, Some(37)),
    known("D2", 73.41619, Some(38)),
    known("E♭/D♯2", 77.78175, Some(39)),
    known("E2", 82.40689, Some(40)),
    known("F2", 87.30706, Some(41)),
    known("F♯/G♭2", 92.49861, Some(42)),
    known("G2", 97.99886, Some(43)),
    known("A♭/G♯2", 103.8262, Some(44)),
    known("A2", 110.0000, Some(45)),
    known("B♭/A♯2", 116.5409, Some(46)),
    known("B2", 123.4708, Some(47)),
    known("C3", 130.8128, Some(48)),
    known("C♯/D♭3", 138.5913, Some(49)),
    known("D3", 146.8324, Some(50)),
    known("E♭/D♯3", 155.5635, Some(51)),
    known("E3", 164.8138, Some(52)),
    known("F3", 174.6141, Some(53)),
    known("F♯/G♭3", 184.9972, Some(54)),
    known("G3", 195.9977, Some(55)),
    known("A♭/G♯3", 207.6523, Some(56)),
    known("A3", 220.0000, Some(57)),
    known("B♭/A♯3", 233.0819, Some(58)),
    known("B3", 246.9417, Some(59)),
    known("C4", 261.6256, Some(60)),
    known("C♯/D♭4", 277.1826, Some(61)),
    known("D4", 293.6648, Some(62)),
    known("E♭/D♯4", 311.1270, Some(63)),
    known("E4", 329.6276, Some(64)),
    known("F4", 349.2282, Some(65)),
    known("F♯/G♭4", 369.9944, Some(66)),
    known("G4", 391.9954, Some(67)),
    known("A♭/G♯4", 415.3047, Some(68)),
    known("A4", 440.0000, Some(69)),
    known("B♭/A♯4", 466.1638, Some(70)),
    known("B4", 493.8833, Some(71)),
    known("C5", 523.2511, Some(72)),
    known("C♯/D♭5", 554.3653, Some(73)),
    known("D5", 587.3295, Some(74)),
    known("E♭/D♯5", 622.2540, Some(75)),
    known("E5", 659.2551, Some(76)),
    known("F5", 698.4565, Some(77)),
    known("F♯/G♭5", 739.9888, Some(78)),
    known("G5", 783.9909, Some(79)),
    known("A♭/G♯5", 830.6094, Some(80)),
    known("A5", 880.0000, Some(81)),
    known("B♭/A♯5", 932.3275, Some(82)),
    known("B5", 987.7666, Some(83)),
    known("C6", 1046.502, Some(84)),
    known("C♯/D♭6", 1108.731, Some(85)),
    known("D6", 1174.659, Some(86)),
    known("E♭/D♯6", 1244.508, Some(87)),
    known("E6", 1318.510, Some(88)),
    known("F6", 1396.913, Some(89)),
    known("F♯/G♭6", 1479.978, Some(90)),
    known("G6", 1567.982, Some(91)),
    known("A♭/G♯6", 1661.219, Some(92)),
    known("A6", 1760.000, Some(93)),
    known("B♭/A♯6", 1864.655, Some(94)),
    known("B6", 1975.533, Some(95)),
    known("C7", 2093.005, Some(96)),
    known("C♯/D♭7", 2217.461, Some(97)),
    known("D7", 2349.318, Some(98)),
    known("E♭/D♯7", 2489.016, Some(99)),
    known("E7", 2637.020, Some(100)),
    known("F7", 2793.826, Some(101)),
    known("F♯/G♭7", 2959.955, Some(102)),
    known("G7", 3135.963, Some(103)),
    known("A♭/G♯7", 3322.438, Some(104)),
    known("A7", 3520.000, Some(105)),
    known("B♭/A♯7", 3729.310, Some(106)),
    known("B7", 3951.066, Some(107)),
    known("C8", 4186.009, Some(108)),
    known("C♯/D♭8", 4434.922, Some(109)),
    known("D8", 4698.636, Some(110)),
    known("E♭/D♯8", 4978.032, Some(111)),
    known("E8", 5274.041, Some(112)),
    known("F8", 5587.652, Some(113)),
    known("F♯/G♭8", 5919.911, Some(114)),
    known("G8", 6271.927, Some(115)),
    known("A♭/G♯8", 6644.875, Some(116)),
    known("A8", 7040.000, Some(117)),
    known("B♭/A♯8", 7458.620, Some(118)),
    known("B8", 7902.133, Some(119)),
    known("C9", 8372.018, Some(120)),
    known("C♯/D♭9", 8869.844, Some(121)),
    known("D9", 9397.273, Some(122)),
    known("E♭/D♯9", 9956.063, Some(123)),
    known("E9", 10548.08, Some(124)),
    known("F9", 11175.30, Some(125)),
    known("F♯/G♭9", 11839.82, Some(126)),
    known("G9", 12543.85, Some(127)),
    known("A♭/G♯9", 13289.75, None),
    known("A9", 14080.00, None),
    known("B♭/A♯9", 14917.24, None),
    known("B9", 15804.27, None),
    known("C10", 16744.04, None),
    known("C♯/D♭10", 17739.69, None),
    known("D10", 18794.55, None),
    known("E♭/D♯10", 19912.13, None),
    known("E10", 21096.16, None),
    known("F10", 22350.61, None),
    known("F♯/G♭10", 23679.64, None),
    known("G10", 25087.71, None),
    known("A♭/G♯10", 26579.50, None),
    known("A10", 28160.00, None),
    known("B♭/A♯10", 29834.48, None),
    known("B10", 31608.53, None),
];
