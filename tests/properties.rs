//! Property tests for pseudo-legal move generation.
//!
//! Run with: cargo test --test properties

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rust_movegen::attacks::{ray_attack, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use rust_movegen::bake::{read_binary, write_binary};
use rust_movegen::bitboard::{render, sq_to_bb};
use rust_movegen::compress::Compression;
use rust_movegen::movegen::{pseudo_legal_moves, MoveGenerator};
use rust_movegen::pawn::{pawn_captures, pawn_pushes};
use rust_movegen::tables::attack_tables;
use rust_movegen::types::{Color, Coordinate, PieceType, ALL_PIECE_TYPES};
use rust_movegen::variants::{occupancy_variants, variant_count};

const ITERATIONS: usize = 2_000;

/// Each square occupied with probability 1/denominator
fn random_occupancy(rng: &mut StdRng, denominator: u32) -> u64 {
    (0..64u8)
        .filter(|_| rng.gen_ratio(1, denominator))
        .fold(0u64, |bb, sq| bb | sq_to_bb(sq))
}

/// Disjoint friendly and enemy occupancies, neither on `own`
fn random_sides(rng: &mut StdRng, own: u64) -> (u64, u64) {
    let friendly = random_occupancy(rng, 6) & !own;
    let enemy = random_occupancy(rng, 6) & !own & !friendly;
    (friendly, enemy)
}

fn random_color(rng: &mut StdRng) -> Color {
    Color::from(rng.gen_bool(0.5))
}

fn at(s: &str) -> Coordinate {
    Coordinate::from_algebraic(s).unwrap()
}

fn bb(squares: &[&str]) -> u64 {
    squares
        .iter()
        .map(|s| sq_to_bb(at(s).square().unwrap()))
        .fold(0, |acc, b| acc | b)
}

#[test]
fn friendly_exclusion_and_disjointness() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..ITERATIONS {
        let sq = rng.gen_range(0..64u8);
        let coord = Coordinate::from_square(sq).unwrap();
        let (friendly, enemy) = random_sides(&mut rng, sq_to_bb(sq));
        let color = random_color(&mut rng);

        for piece in ALL_PIECE_TYPES {
            let m = pseudo_legal_moves(Some(piece), coord, friendly, enemy, color);
            assert_eq!(
                m.destinations() & friendly,
                0,
                "{} on {coord} hits a friendly piece\n{}",
                piece.to_human(),
                render(friendly)
            );
            assert_eq!(m.quiet & m.kills, 0, "{} on {coord}", piece.to_human());
            assert_eq!(m.kills & !enemy, 0, "{} on {coord}", piece.to_human());
            assert_eq!(m.quiet & enemy, 0, "{} on {coord}", piece.to_human());
        }
    }
}

#[test]
fn sliding_attacks_shrink_with_occupancy() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..ITERATIONS {
        let sq = rng.gen_range(0..64u8);
        let occupancy = random_occupancy(&mut rng, 4);
        for directions in [&BISHOP_DIRECTIONS, &ROOK_DIRECTIONS] {
            let blocked = ray_attack(sq, occupancy, directions);
            let empty = ray_attack(sq, 0, directions);
            assert_eq!(blocked & !empty, 0);
        }
    }
}

#[test]
fn table_lookup_matches_ray_walk() {
    let tables = attack_tables();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..ITERATIONS {
        let sq = rng.gen_range(0..64u8);
        let occupancy: u64 = rng.gen();
        for compression in Compression::ALL {
            assert_eq!(
                tables.rook.attacks_with(compression, sq, occupancy),
                ray_attack(sq, occupancy, &ROOK_DIRECTIONS)
            );
            assert_eq!(
                tables.bishop.attacks_with(compression, sq, occupancy),
                ray_attack(sq, occupancy, &BISHOP_DIRECTIONS)
            );
        }
    }
}

#[test]
fn compression_round_trip() {
    let tables = attack_tables();
    for sq in 0..64u8 {
        for mask in [tables.bishop.relevant_mask(sq), tables.rook.relevant_mask(sq)] {
            let variants = occupancy_variants(mask);
            assert_eq!(variants.len(), variant_count(mask));
            for (idx, &occupancy) in variants.iter().enumerate() {
                for compression in Compression::ALL {
                    assert_eq!(compression.variant_index(occupancy, mask), idx);
                }
            }
        }
    }
}

#[test]
fn compression_strategies_agree() {
    // Without BMI2 both strategies run the same portable code, so there is
    // nothing to compare.
    if !Compression::Pext.is_available() {
        eprintln!("skipping compression_strategies_agree: CPU has no BMI2");
        return;
    }
    let tables = attack_tables();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..20_000 {
        let sq = rng.gen_range(0..64u8);
        let mask = if rng.gen_bool(0.5) {
            tables.rook.relevant_mask(sq)
        } else {
            tables.bishop.relevant_mask(sq)
        };
        let occupancy: u64 = rng.gen();
        assert_eq!(
            Compression::Pext.variant_index(occupancy, mask),
            Compression::Portable.variant_index(occupancy, mask)
        );
    }
}

#[test]
fn pawn_back_rank_is_empty() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..ITERATIONS {
        let occupancy = random_occupancy(&mut rng, 4);
        let file = rng.gen_range(0..8);
        assert_eq!(pawn_pushes(Coordinate::new(7, file), occupancy, Color::White), 0);
        assert_eq!(pawn_captures(Coordinate::new(7, file), occupancy, Color::White), 0);
        assert_eq!(pawn_pushes(Coordinate::new(0, file), occupancy, Color::Black), 0);
        assert_eq!(pawn_captures(Coordinate::new(0, file), occupancy, Color::Black), 0);
    }
}

#[test]
fn pawn_pushes_follow_blockers() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..ITERATIONS {
        let color = random_color(&mut rng);
        let coord = Coordinate::new(rng.gen_range(0..8), rng.gen_range(0..8));
        if coord.rank == color.pawn_back_rank() {
            continue;
        }
        let occupancy = random_occupancy(&mut rng, 3);
        let pushes = pawn_pushes(coord, occupancy, color);

        let single = coord.offset(Coordinate::new(color.pawn_direction(), 0));
        let double = single.offset(Coordinate::new(color.pawn_direction(), 0));

        assert_eq!(single.is_set(pushes), !single.is_set(occupancy));
        let expect_double = coord.rank == color.pawn_start_rank()
            && !single.is_set(occupancy)
            && !double.is_set(occupancy);
        assert_eq!(double.is_set(pushes), expect_double, "pawn on {coord}");
        assert!(pushes.count_ones() <= 2);
    }
}

#[test]
fn pawn_captures_only_hit_enemies_diagonally() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..ITERATIONS {
        let color = random_color(&mut rng);
        let coord = Coordinate::new(rng.gen_range(0..8), rng.gen_range(0..8));
        let enemy = random_occupancy(&mut rng, 2);
        let captures = pawn_captures(coord, enemy, color);
        assert_eq!(captures & !enemy, 0);

        if coord.rank == color.pawn_back_rank() {
            continue;
        }
        for file_delta in [-1, 1] {
            let target = coord.offset(Coordinate::new(color.pawn_direction(), file_delta));
            assert_eq!(target.is_set(captures), target.is_set(enemy));
        }
    }
}

#[test]
fn double_push_needs_single_push_square() {
    // White e2 with e3 occupied: nothing, whatever e4 holds
    assert_eq!(pawn_pushes(at("e2"), bb(&["e3"]), Color::White), 0);
    assert_eq!(pawn_pushes(at("e2"), bb(&["e3", "e4"]), Color::White), 0);
    // Both empty: both set
    assert_eq!(pawn_pushes(at("e2"), 0, Color::White), bb(&["e3", "e4"]));
    // Black from the seventh rank
    assert_eq!(pawn_pushes(at("b7"), 0, Color::Black), bb(&["b6", "b5"]));
    assert_eq!(pawn_pushes(at("b7"), bb(&["b6"]), Color::Black), 0);
}

#[test]
fn scenario_rook_a1_empty_board() {
    let m = pseudo_legal_moves(Some(PieceType::Rook), at("a1"), 0, 0, Color::White);
    assert_eq!(m.quiet.count_ones(), 14);
    assert_eq!(m.quiet, (0x0101_0101_0101_0101 | 0xFF) & !1);
}

#[test]
fn scenario_bishop_d4_empty_board() {
    let m = pseudo_legal_moves(Some(PieceType::Bishop), at("d4"), 0, 0, Color::White);
    let diagonals = bb(&[
        "a1", "b2", "c3", "e5", "f6", "g7", "h8", "a7", "b6", "c5", "e3", "f2", "g1",
    ]);
    assert_eq!(m.quiet, diagonals);
    assert_eq!(m.quiet.count_ones(), 13);
}

#[test]
fn scenario_knight_a1_empty_board() {
    let m = pseudo_legal_moves(Some(PieceType::Knight), at("a1"), 0, 0, Color::White);
    assert_eq!(m.quiet, bb(&["b3", "c2"]));
}

#[test]
fn scenario_white_pawn_e2() {
    let m = pseudo_legal_moves(Some(PieceType::Pawn), at("e2"), 0, 0, Color::White);
    assert_eq!(m.quiet, bb(&["e3", "e4"]));
    assert_eq!(m.kills, 0);

    let enemy = bb(&["d3", "f3"]);
    let m = pseudo_legal_moves(Some(PieceType::Pawn), at("e2"), 0, enemy, Color::White);
    assert_eq!(m.kills, enemy);
    assert_eq!(m.quiet, bb(&["e3", "e4"]));
}

#[test]
fn extreme_occupancies_are_defined() {
    for sq in 0..64u8 {
        let coord = Coordinate::from_square(sq).unwrap();
        let own = sq_to_bb(sq);
        for piece in ALL_PIECE_TYPES {
            // Everything else friendly: no moves at all
            let m = pseudo_legal_moves(Some(piece), coord, !own, 0, Color::White);
            assert!(m.is_empty(), "{} on {coord}", piece.to_human());

            // Everything else enemy: no quiet moves
            let m = pseudo_legal_moves(Some(piece), coord, own, !own, Color::Black);
            assert_eq!(m.quiet, 0, "{} on {coord}", piece.to_human());
        }
    }
}

#[test]
fn loaded_tables_answer_like_built_tables() {
    let mut bytes = Vec::new();
    write_binary(attack_tables(), &mut bytes).unwrap();
    let loaded = read_binary(bytes.as_slice()).unwrap();

    let built = MoveGenerator::new(attack_tables());
    let from_file = MoveGenerator::new(&loaded);

    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..ITERATIONS {
        let sq = rng.gen_range(0..64u8);
        let coord = Coordinate::from_square(sq).unwrap();
        let (friendly, enemy) = random_sides(&mut rng, sq_to_bb(sq));
        let color = random_color(&mut rng);
        for piece in ALL_PIECE_TYPES {
            assert_eq!(
                built.pseudo_legal(Some(piece), coord, friendly, enemy, color),
                from_file.pseudo_legal(Some(piece), coord, friendly, enemy, color)
            );
        }
    }
}
