use log::info;

use crate::audio::{AudioBackend, AudioDirector};
use crate::data_model::DataModel;
use crate::events::{GameEvent, LoadReason};
use crate::input::{Command, InputQueue, KeyCode};
use crate::lifecycle::{Game, LifecycleState, MoveOutcome};
use crate::scene::SceneObject;

/// Presentation shell around a [`Game`]: feeds it commands and fans its
/// events out to the render mirror, the audio director and the success
/// banner.
pub struct App<A: AudioBackend> {
    game: Game,
    model: DataModel,
    input: InputQueue,
    audio: AudioDirector<A>,
    banner_visible: bool,
}

impl<A: AudioBackend> App<A> {
    pub fn new(game: Game, audio: A) -> Self {
        let mut app = Self {
            model: DataModel::from_grid(game.grid()),
            game,
            input: InputQueue::new(),
            audio: AudioDirector::new(audio),
            banner_visible: false,
        };
        app.dispatch_events();
        app
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle for render loops; clones share the same snapshot.
    pub fn model(&self) -> &DataModel {
        &self.model
    }

    pub fn audio(&self) -> &AudioDirector<A> {
        &self.audio
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn hide_banner(&mut self) {
        self.banner_visible = false;
    }

    pub fn objects(&self) -> Vec<SceneObject> {
        self.model.all_objects()
    }

    pub fn push_key(&self, key: KeyCode) {
        self.input.push_key(key);
    }

    /// Handles every queued key press in order. Returns how many commands
    /// were executed.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(command) = self.input.next_command() {
            self.execute(command);
            handled += 1;
        }
        handled
    }

    pub fn execute(&mut self, command: Command) -> Option<MoveOutcome> {
        let outcome = match command {
            Command::Move(direction) => Some(self.game.handle_move(direction)),
            Command::Start => {
                self.game.start();
                None
            }
            Command::Restart => {
                self.game.restart();
                None
            }
        };
        self.dispatch_events();
        outcome
    }

    fn dispatch_events(&mut self) {
        let mut resync = false;
        for event in self.game.drain_events() {
            self.audio.handle_event(&event);
            match &event {
                GameEvent::LevelLoaded { reason, .. } => {
                    resync = true;
                    if *reason == LoadReason::Restart {
                        self.banner_visible = false;
                    }
                }
                GameEvent::LevelCompleted { index, stats } => {
                    info!(
                        "Level {} complete ({} moves, {} pushes)",
                        index + 1,
                        stats.moves,
                        stats.pushes
                    );
                    self.banner_visible = true;
                }
                other => {
                    self.model.apply_event(other);
                }
            }
        }
        if resync {
            self.model.sync(self.game.grid());
        }
    }

    /// One-line status for logs and the native shell.
    pub fn summary(&self) -> String {
        let game = &self.game;
        let state = match game.state() {
            LifecycleState::Playing => "playing",
            LifecycleState::Loading => "loading",
            LifecycleState::Completed => "completed",
        };
        format!(
            "level {}/{} {state}: {}/{} boxes on goals, {} moves, {} pushes",
            game.level_index() + 1,
            game.level_count(),
            game.boxes_on_goals(),
            game.grid().box_count(),
            game.stats().moves,
            game.stats().pushes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, SilentAudio};
    use crate::config::GameConfig;
    use crate::error::AudioError;
    use crate::input::NamedKey;
    use crate::level::LevelDefinition;
    use crate::movement::Direction;
    use crate::scene::{facing_yaw, Scene, PLAYER_NAME};

    #[derive(Default)]
    struct Cues(Vec<AudioCue>);

    impl AudioBackend for Cues {
        fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
            self.0.push(cue);
            Ok(())
        }
    }

    fn levels() -> Vec<LevelDefinition> {
        vec![
            LevelDefinition::new(["#####", "#@$*#", "#####"]),
            LevelDefinition::new(["######", "#@ $*#", "######"]),
        ]
    }

    fn app() -> App<Cues> {
        App::new(Game::new(levels(), GameConfig::default()).unwrap(), Cues::default())
    }

    #[test]
    fn model_tracks_moves_and_level_changes() {
        let mut app = app();
        assert_eq!(app.audio().backend().0, [AudioCue::BackgroundLoop]);

        app.push_key(KeyCode::Named(NamedKey::Right));
        assert_eq!(app.pump(), 1);

        assert_eq!(app.game().level_index(), 1);
        assert!(app.banner_visible());
        assert_eq!(app.objects(), Scene::from_grid(app.game().grid()).objects);
        assert_eq!(
            app.audio().backend().0,
            [AudioCue::BackgroundLoop, AudioCue::BoxPushed]
        );
    }

    #[test]
    fn plain_moves_update_only_the_player() {
        let game = Game::new(vec![levels().remove(1)], GameConfig::default()).unwrap();
        let mut app = App::new(game, SilentAudio);
        let box_before = app.model().get("box-0").unwrap();

        let outcome = app.execute(Command::Move(Direction::Right)).unwrap();
        assert!(outcome.moved());
        assert_eq!(outcome.result.unwrap().pushed_box, None);

        let player = app.model().get(PLAYER_NAME).unwrap();
        assert_eq!(player.cell(), app.game().grid().player().position);
        assert_eq!(player.rotation_y, facing_yaw(Direction::Right));
        assert_eq!(app.model().get("box-0").unwrap(), box_before);
    }

    #[test]
    fn restart_hides_banner_and_resyncs() {
        let mut app = app();
        app.execute(Command::Move(Direction::Right));
        assert!(app.banner_visible());
        app.execute(Command::Move(Direction::Right));
        app.execute(Command::Restart);
        assert!(!app.banner_visible());
        assert_eq!(app.game().level_index(), 1);
        assert_eq!(app.game().stats().moves, 0);
        assert_eq!(app.objects(), Scene::from_grid(app.game().grid()).objects);
        assert!(app.summary().starts_with("level 2/2 playing: 0/1 boxes on goals"));
    }
}
