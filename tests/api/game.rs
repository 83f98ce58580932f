use tictacgo::game::board::{get_empty_board, Square, SquareCharacter, SquareUpdate};
use tictacgo::game::position::Position;
use tictacgo::game::win_detector::GameResult;
use tictacgo::websocket::message::{GameMessage, GameResponse};
use std::time::Duration;
use tokio::time;

use crate::helpers::test_app::TestApp;

fn update(position: u8, character: SquareCharacter) -> SquareUpdate {
    SquareUpdate {
        position: Position::try_from(position).unwrap(),
        character,
    }
}

#[tokio::test]
async fn create_game_works() {
    let game = TestApp::create_game_without_players(false).await;

    assert!(game.id.chars().all(|char| char.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn create_game_without_body_works() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/game", app.base_address))
        .send()
        .await
        .expect("Failed to execute CreateGame request.");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn create_game_with_malformed_body_fails() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/game", app.base_address))
        .header("Content-Type", "application/json")
        .body(r#"{"vsComputer":"yes"}"#)
        .send()
        .await
        .expect("Failed to execute CreateGame request.");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn player_is_welcomed_when_joining() {
    let mut game = TestApp::create_game_without_players(false).await;

    let welcome = game.add_player("p1").await.unwrap();

    assert_eq!(
        welcome,
        GameResponse::Welcome {
            is_game_started: false,
            x_client: "".to_string(),
            o_client: "".to_string(),
            board: get_empty_board(),
            your_character: Square::Empty,
        }
    );
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let mut game = TestApp::create_game_without_players(false).await;
    game.add_player("p1").await.unwrap();

    game.players[0].send_text("ping").await;

    assert_eq!(game.players[0].receive_text().await, Ok("pong".to_string()));
}

#[tokio::test]
async fn when_player_already_exists_add_player_with_same_nickname_to_game_fails() {
    let mut game = TestApp::create_game_without_players(false).await;
    game.add_player("p1").await.unwrap();

    let mut player = game.connect("p1").await.unwrap();

    assert_eq!(player.receive_error().await, "PLAYER_ALREADY_EXISTS");
    player.assert_closed().await;
}

#[tokio::test]
async fn joining_a_game_that_does_not_exist_fails() {
    let game = TestApp::create_game_without_players(false).await;
    let mut player = game.app.connect_player("nope1", "p1").await.unwrap();

    assert_eq!(player.receive_error().await, "GAME_DOES_NOT_EXIST");
    player.assert_closed().await;
}

#[tokio::test]
async fn character_cannot_be_taken_twice() {
    let mut game = TestApp::create_game_with_characters().await;
    game.add_player("spectator").await.unwrap();

    game.players[2]
        .send_game_message(&GameMessage::SelectCharacter(SquareCharacter::X))
        .await;

    assert_eq!(game.players[2].receive_error().await, "CHARACTER_ALREADY_TAKEN");
}

#[tokio::test]
async fn joining_player_is_welcomed_with_the_characters() {
    let mut game = TestApp::create_game_with_characters().await;

    let welcome = game.add_player("spectator").await.unwrap();

    assert_eq!(
        welcome,
        GameResponse::Welcome {
            is_game_started: false,
            x_client: "p1".to_string(),
            o_client: "p2".to_string(),
            board: get_empty_board(),
            your_character: Square::Empty,
        }
    );
}

#[tokio::test]
async fn game_cannot_start_without_both_characters() {
    let mut game = TestApp::create_game_without_players(false).await;
    game.add_player("p1").await.unwrap();
    game.players[0]
        .select_character(SquareCharacter::O)
        .await
        .unwrap();
    game.players[0].receive().await.unwrap();

    game.players[0].start_game().await;

    assert_eq!(game.players[0].receive_error().await, "NOT_ENOUGH_PLAYERS");
}

#[tokio::test]
async fn spectator_cannot_start_game() {
    let mut game = TestApp::create_game_with_characters().await;
    game.add_player("spectator").await.unwrap();

    game.players[2].start_game().await;

    assert_eq!(
        game.players[2].receive_error().await,
        "SPECTATOR_CANNOT_START_GAME"
    );
}

#[tokio::test]
async fn game_can_be_started() {
    let mut game = TestApp::create_game_with_characters().await;

    game.players[1].start_game().await;

    game.players[0].assert_game_started().await;
    game.players[1].assert_game_started().await;
}

#[tokio::test]
async fn players_take_turns_until_x_wins() {
    let mut game = TestApp::create_started_game().await;

    for (turn, position) in [0, 3, 1, 4, 2].into_iter().enumerate() {
        let (player, character) = if turn % 2 == 0 {
            (0, SquareCharacter::X)
        } else {
            (1, SquareCharacter::O)
        };
        game.players[player].choose_square(position).await;

        for player in game.players.iter_mut() {
            assert_eq!(
                player.receive_squares().await,
                vec![update(position, character)]
            );
        }
    }

    let result = GameResult {
        winning_combination: vec![Position::TOP_LEFT, Position::TOP_CENTER, Position::TOP_RIGHT],
        winning_character: Square::X,
        has_winner: true,
    };
    for player in game.players.iter_mut() {
        assert_eq!(player.receive().await, Ok(GameResponse::GameOver(true)));
        assert_eq!(player.receive().await, Ok(GameResponse::Result(result.clone())));
    }
}

#[tokio::test]
async fn player_cannot_choose_square_out_of_turn() {
    let mut game = TestApp::create_started_game().await;

    game.players[1].choose_square(4).await;

    assert_eq!(game.players[1].receive_error().await, "NOT_PLAYERS_TURN");
}

#[tokio::test]
async fn taken_square_cannot_be_chosen() {
    let mut game = TestApp::create_started_game().await;
    game.players[0].choose_square(4).await;
    for player in game.players.iter_mut() {
        player.receive_squares().await;
    }

    game.players[1].choose_square(4).await;

    assert_eq!(game.players[1].receive_error().await, "SQUARE_ALREADY_TAKEN");
}

#[tokio::test]
async fn board_can_be_requested() {
    let mut game = TestApp::create_started_game().await;
    game.players[0].choose_square(8).await;
    for player in game.players.iter_mut() {
        player.receive_squares().await;
    }

    let response = game.players[1].get_board().await.unwrap();

    let mut board = get_empty_board();
    board.set_square(Position::BOTTOM_RIGHT, SquareCharacter::X);
    assert_eq!(response, GameResponse::Board(board));
}

#[tokio::test]
async fn invalid_message_is_reported_and_the_websocket_stays_open() {
    let mut game = TestApp::create_started_game().await;

    game.players[0]
        .send_text(r#"{"instruction":"choose square","content":42}"#)
        .await;
    assert_eq!(
        game.players[0].receive_error().await,
        "UNPROCESSABLE_WEBSOCKET_MESSAGE"
    );

    game.players[0].send_text("ping").await;
    assert_eq!(game.players[0].receive_text().await, Ok("pong".to_string()));
}

#[tokio::test]
async fn silent_player_is_dropped_even_while_the_game_goes_on() {
    let app = TestApp::spawn_app_with_player_timeout(Some(2)).await;
    let mut game = app.into_game_with_characters().await;
    game.add_player("spectator").await.unwrap();
    game.players[0].start_game().await;
    for player in game.players.iter_mut() {
        player.assert_game_started().await;
    }

    for (turn, position) in [0, 1, 2, 4, 3, 5, 7, 6, 8].into_iter().enumerate() {
        time::sleep(Duration::from_millis(400)).await;
        game.players[turn % 2].choose_square(position).await;
        for player in game.players[..2].iter_mut() {
            player.receive_squares().await;
        }
    }

    let spectator = &mut game.players[2];
    let mut squares = 0;
    loop {
        match spectator.receive().await {
            Ok(GameResponse::Square(_)) => squares += 1,
            Ok(GameResponse::Error { r#type, .. }) => {
                assert_eq!(r#type, "WEBSOCKET_CLOSED");
                break;
            }
            Ok(_) => {}
            response => panic!("Expected the spectator to time out, got {response:?}"),
        }
    }
    assert!(squares < 9);
    spectator.assert_closed().await;
}

#[tokio::test]
async fn computer_answers_every_move() {
    let mut game = TestApp::create_game_without_players(true).await;
    let welcome = game.add_player("p1").await.unwrap();
    assert!(matches!(
        welcome,
        GameResponse::Welcome { ref o_client, .. } if o_client == "Computer"
    ));
    game.players[0]
        .select_character(SquareCharacter::X)
        .await
        .unwrap();
    assert_eq!(
        game.players[0].receive().await,
        Ok(GameResponse::players(
            Some("p1".to_string()),
            Some("Computer".to_string())
        ))
    );

    game.players[0].start_game().await;
    game.players[0].assert_game_started().await;
    game.players[0].choose_square(4).await;

    let updates = game.players[0].receive_squares().await;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], update(4, SquareCharacter::X));
    assert_eq!(updates[1].character, SquareCharacter::O);
    assert_ne!(updates[1].position, Position::CENTER);
}

#[tokio::test]
async fn game_is_removed_after_all_players_leave() {
    let mut game = TestApp::create_game_without_players(false).await;
    game.add_player("p1").await.unwrap();
    drop(game.players.pop());

    time::sleep(game.app.inactivity_timeout * 3).await;

    let mut player = game.connect("p1").await.unwrap();
    assert_eq!(player.receive_error().await, "GAME_DOES_NOT_EXIST");
}
