use rand::rngs::StdRng;
use rand::SeedableRng;
use ricochet_solver::{
    decode_game_id, decode_game_id_sized, encode_game_id, Cell, Color, GameIdError, Generator,
    GeneratorConfig, WallType,
};

#[test]
fn candidate_boards_round_trip() {
    let mut generator = Generator::new(GeneratorConfig::default(), StdRng::seed_from_u64(8));
    for _ in 0..25 {
        let puzzle = generator.build_candidate().unwrap();
        let id = encode_game_id(&puzzle).unwrap();
        let decoded = decode_game_id(&id).unwrap();
        assert_eq!(decoded.robots, puzzle.robots);
        assert_eq!(decoded.target, puzzle.target);
        assert_eq!(decoded.board, puzzle.board);
    }
}

#[test]
fn small_boards_need_their_size() {
    let config = GeneratorConfig {
        board_size: 8,
        ..GeneratorConfig::default()
    };
    let mut generator = Generator::new(config, StdRng::seed_from_u64(8));
    let puzzle = generator.build_candidate().unwrap();
    let id = encode_game_id(&puzzle).unwrap();
    assert_eq!(decode_game_id_sized(&id, 8).unwrap(), puzzle);
    assert_ne!(decode_game_id(&id).unwrap(), puzzle);
}

#[test]
fn hand_written_id() {
    let puzzle = decode_game_id("4A1F0000E-3A1-A17A14F00").unwrap();
    assert_eq!(puzzle.robots.get(Color::Red), Cell::new(10, 1));
    assert_eq!(puzzle.robots.get(Color::Yellow), Cell::new(0, 14));
    assert_eq!(puzzle.target.color, Color::Yellow);
    assert_eq!(puzzle.target.cell, Cell::new(10, 1));
    assert_eq!(
        puzzle.board.walls_at(Cell::new(10, 1)),
        WallType::NorthEast.flags()
    );
    assert_eq!(
        puzzle.board.walls_at(Cell::new(15, 0)),
        WallType::NorthWest.flags()
    );
    assert_eq!(encode_game_id(&puzzle).unwrap(), "4A1F0000E-3A1-F00A11");
}

#[test]
fn garbage_is_an_error_not_a_panic() {
    for id in ["", "-", "--", "---", "zz-zz-zz", "4-0-0", "4ABCDEFGH-000-", "40011223F-0A-1"] {
        assert!(decode_game_id(id).is_err(), "{id:?} should not decode");
    }
    assert_eq!(
        decode_game_id("4001122F3-000-1"),
        Err(GameIdError::SegmentLength {
            segment: "walls",
            len: 1
        })
    );
}
