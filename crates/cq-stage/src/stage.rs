use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cq_core::{DialogueScript, InteractableInfo, ItemType, Library, Placement};
use cq_dialogue::{AudioSink, Interactable, Phase, Signal, Sinks, TextSink};

use crate::clock::StageClock;
use crate::config::StageConfig;
use crate::error::{StageError, StageResult};
use crate::event::{EventLog, StageEvent, StageEventKind};
use crate::focus::Overlaps;

/// Index of an instance on a stage, in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The top-level orchestrator.
///
/// Owns every interactable instance, the shared scripts, the clock, the
/// event log and the output sinks. Routes overlap, interact, option and
/// tick input to the focused instance and records what happened.
pub struct Stage<A: AudioSink, T: TextSink> {
    scripts: BTreeMap<String, Arc<DialogueScript>>,
    instances: Vec<Interactable>,
    overlaps: Overlaps,
    engaged: Option<InstanceId>,
    clock: StageClock,
    events: EventLog,
    config: StageConfig,
    audio: A,
    text: T,
}

impl<A: AudioSink, T: TextSink> fmt::Debug for Stage<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("tick", &self.clock.tick())
            .field("instances", &self.instances.len())
            .field("engaged", &self.engaged)
            .field("events", &self.events.len())
            .finish()
    }
}

impl<A: AudioSink, T: TextSink> Stage<A, T> {
    /// Build a stage from a library, spawning one instance per placement.
    pub fn new(library: &Library, config: StageConfig, audio: A, text: T) -> StageResult<Self> {
        let scripts = library
            .scripts
            .iter()
            .map(|(name, script)| (name.clone(), Arc::new(script.clone())))
            .collect();
        let mut stage = Self {
            scripts,
            instances: Vec::new(),
            overlaps: Overlaps::new(),
            engaged: None,
            clock: StageClock::new(),
            events: EventLog::new(config.max_events),
            config,
            audio,
            text,
        };

        for placement in &library.placements {
            match placement {
                Placement::Conversation {
                    name,
                    script,
                    allow_repeat,
                } => {
                    stage.spawn_conversation(name, script, *allow_repeat)?;
                }
                Placement::Item { info } => {
                    stage.spawn_item(info.clone());
                }
            }
        }
        log::debug!(
            "stage built with {} scripts and {} instances",
            stage.scripts.len(),
            stage.instances.len()
        );
        Ok(stage)
    }

    /// Add a conversation instance walking a library script.
    pub fn spawn_conversation(
        &mut self,
        name: &str,
        script: &str,
        allow_repeat: bool,
    ) -> StageResult<InstanceId> {
        let shared = self
            .scripts
            .get(script)
            .cloned()
            .ok_or_else(|| StageError::UnknownScript {
                name: name.to_string(),
                script: script.to_string(),
            })?;
        let instance = Interactable::conversation(name, shared, self.config.dialogue)
            .with_repeat(allow_repeat);
        Ok(self.push(instance))
    }

    /// Add an inspectable item.
    pub fn spawn_item(&mut self, info: InteractableInfo) -> InstanceId {
        self.push(Interactable::item(info))
    }

    fn push(&mut self, instance: Interactable) -> InstanceId {
        let id = InstanceId(self.instances.len());
        log::debug!("spawned '{}' as {id}", instance.name());
        self.instances.push(instance);
        id
    }

    /// Look up an instance.
    pub fn instance(&self, id: InstanceId) -> Option<&Interactable> {
        self.instances.get(id.0)
    }

    /// All instances with their ids, in spawn order.
    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &Interactable)> + '_ {
        self.instances
            .iter()
            .enumerate()
            .map(|(i, instance)| (InstanceId(i), instance))
    }

    /// First instance with exactly this name.
    pub fn find(&self, name: &str) -> Option<InstanceId> {
        self.instances
            .iter()
            .position(|i| i.name() == name)
            .map(InstanceId)
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the stage has no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The instance that receives interact and option input.
    ///
    /// Locked on the engaged instance until it leaves the engaged phases;
    /// otherwise picked by the focus policy from the overlapping instances
    /// that are not exhausted.
    pub fn focus(&self) -> Option<InstanceId> {
        if let Some(id) = self.engaged {
            return Some(id);
        }
        self.overlaps.pick(self.config.focus, |id| {
            self.instance(id)
                .is_some_and(|i| i.phase() == Phase::Overlapping && !i.finished())
        })
    }

    /// The player entered an instance's trigger volume.
    pub fn overlap_begin(&mut self, id: InstanceId) {
        if id.0 >= self.instances.len() {
            log::debug!("overlap with unknown instance {id} ignored");
            return;
        }
        self.overlaps.begin(id);
        let mut sinks = Sinks::new(&mut self.audio, &mut self.text);
        let signals = self.instances[id.0].overlap_begin(&mut sinks);
        self.record(id, signals);
    }

    /// The player left an instance's trigger volume.
    pub fn overlap_end(&mut self, id: InstanceId) {
        if id.0 >= self.instances.len() {
            return;
        }
        self.overlaps.end(id);
        let signals = self.instances[id.0].overlap_end();
        self.record(id, signals);
    }

    /// Update the player's distance to an overlapped instance.
    pub fn report_distance(&mut self, id: InstanceId, distance: f64) {
        if self.overlaps.contains(id) {
            self.overlaps.report_distance(id, distance);
        }
    }

    /// The interact trigger was pressed.
    pub fn interact_pressed(&mut self) {
        let Some(id) = self.focus() else {
            log::debug!("interact with nothing in focus");
            return;
        };
        let mut sinks = Sinks::new(&mut self.audio, &mut self.text);
        let signals = self.instances[id.0].interact(&mut sinks);
        self.record(id, signals);
    }

    /// The interact trigger was released.
    ///
    /// An instance that resets while the player is still inside its volume
    /// is overlapped again at once.
    pub fn interact_released(&mut self) {
        let Some(id) = self.engaged else {
            return;
        };
        let signals = self.instances[id.0].finish();
        self.record(id, signals);

        let instance = &self.instances[id.0];
        if self.overlaps.contains(id)
            && instance.phase() == Phase::NotOverlapping
            && !instance.finished()
        {
            let mut sinks = Sinks::new(&mut self.audio, &mut self.text);
            let signals = self.instances[id.0].overlap_begin(&mut sinks);
            self.record(id, signals);
        }
    }

    /// The player picked an option (`0` means none).
    pub fn option_chosen(&mut self, option: u8) {
        let Some(id) = self.engaged else {
            return;
        };
        let mut sinks = Sinks::new(&mut self.audio, &mut self.text);
        let signals = self.instances[id.0].choose_option(option, &mut sinks);
        self.record(id, signals);
    }

    /// Advance time by `dt` seconds for every instance.
    pub fn tick(&mut self, dt: f64) {
        self.clock.advance(dt);
        for i in 0..self.instances.len() {
            let mut sinks = Sinks::new(&mut self.audio, &mut self.text);
            let signals = self.instances[i].tick(dt, &mut sinks);
            self.record(InstanceId(i), signals);
        }
    }

    /// Turn signals into log events and refresh the engagement lock.
    fn record(&mut self, id: InstanceId, signals: Vec<Signal>) {
        let tick = self.clock.tick();
        let name = self.instances[id.0].name().to_string();

        for signal in signals {
            let (kind, description) = match signal {
                Signal::PhaseChanged { from, to } => (
                    StageEventKind::PhaseChanged { from, to },
                    format!("'{name}' {from} -> {to}"),
                ),
                Signal::LineStarted {
                    position,
                    speaker,
                    text,
                } => {
                    let description = format!("{speaker}: {text}");
                    (StageEventKind::LineStarted { position, speaker }, description)
                }
                Signal::LineCompleted { .. } => continue,
                Signal::QuestionShown { options, .. } => {
                    let description = format!("'{name}' asks: {}", options.join(" / "));
                    (StageEventKind::QuestionShown { options }, description)
                }
                Signal::Branched { from, to, option } => (
                    StageEventKind::Branched { from, to, option },
                    format!("'{name}' option {option} branches {from} -> {to}"),
                ),
                Signal::Answered {
                    accepted,
                    item_type,
                } => {
                    let answer = if accepted { "yes" } else { "no" };
                    self.events.push(StageEvent::new(
                        tick,
                        id,
                        StageEventKind::Answered {
                            accepted,
                            item_type,
                        },
                        format!("'{name}' answered {answer}"),
                    ));
                    if accepted && item_type == ItemType::Save {
                        log::debug!("save requested by '{name}'");
                        (StageEventKind::SaveRequested, "save requested".to_string())
                    } else {
                        continue;
                    }
                }
                Signal::Finished => (StageEventKind::Finished, format!("'{name}' finished")),
                Signal::Reset => (StageEventKind::Reset, format!("'{name}' reset")),
            };
            self.events.push(StageEvent::new(tick, id, kind, description));
        }

        let engaged = self.instances[id.0].phase().is_engaged();
        if engaged {
            self.engaged = Some(id);
        } else if self.engaged == Some(id) {
            self.engaged = None;
        }
    }

    /// Whether the player is inside an instance's trigger volume.
    pub fn is_overlapping(&self, id: InstanceId) -> bool {
        self.overlaps.contains(id)
    }

    /// The instance holding the focus lock, if any.
    pub fn engaged(&self) -> Option<InstanceId> {
        self.engaged
    }

    /// The stage clock.
    pub fn clock(&self) -> &StageClock {
        &self.clock
    }

    /// The event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The stage configuration.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The audio sink.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Mutable access to the audio sink, e.g. to drain a transcript.
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// The text sink.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Mutable access to the text sink.
    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// Consume the stage and return its sinks.
    pub fn into_sinks(self) -> (A, T) {
        (self.audio, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_core::{ConversationNode, DialogueNode, Position, QuestionNode, SubtitleNode};
    use cq_dialogue::{NullSink, SkipAudio, Transcript, TranscriptEntry};

    use crate::config::FocusPolicy;

    fn greeting() -> DialogueScript {
        DialogueScript::new()
            .with_conversation(
                ConversationNode::new(0).with_dialogue(
                    DialogueNode::new(0, "Guide")
                        .with_subtitle(SubtitleNode::new(0, "Hi").with_duration(1.0))
                        .with_subtitle(SubtitleNode::new(1, "Yes?").with_question()),
                ),
            )
            .with_question(QuestionNode::new("Again", 1, Position::new(0, 0, 1), 0))
    }

    fn library() -> Library {
        Library::new()
            .with_script("greeting", greeting())
            .with_placement(Placement::conversation("guide", "greeting"))
            .with_placement(Placement::item(
                InteractableInfo::new(7, "Crystal")
                    .with_description("Rest here?")
                    .with_type(ItemType::Save)
                    .with_question(),
            ))
            .with_placement(Placement::item(
                InteractableInfo::new(8, "Sign").with_description("North: village"),
            ))
    }

    fn stage(config: StageConfig) -> Stage<Transcript, Transcript> {
        Stage::new(&library(), config, Transcript::new(), Transcript::new()).unwrap()
    }

    const GUIDE: InstanceId = InstanceId(0);
    const CRYSTAL: InstanceId = InstanceId(1);
    const SIGN: InstanceId = InstanceId(2);

    #[test]
    fn placements_spawn_in_order() {
        let stage = stage(StageConfig::default());
        assert_eq!(stage.len(), 3);
        assert_eq!(stage.find("Crystal"), Some(CRYSTAL));
        assert_eq!(stage.find("nobody"), None);
        assert!(stage.instance(GUIDE).unwrap().as_conversation().is_some());
        assert!(!stage.instance(CRYSTAL).unwrap().allow_repeat());
    }

    #[test]
    fn unknown_script_is_an_error() {
        let library = Library::new().with_placement(Placement::conversation("ghost", "missing"));
        let err = Stage::new(&library, StageConfig::default(), NullSink, NullSink).unwrap_err();
        assert!(matches!(err, StageError::UnknownScript { ref script, .. } if script == "missing"));
        assert_eq!(
            err.to_string(),
            "unknown script 'missing' for instance 'ghost'"
        );
    }

    #[test]
    fn greeting_scenario_through_the_stage() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(GUIDE);
        stage.interact_pressed();
        stage.interact_released();
        stage.tick(0.5);
        stage.tick(0.5);
        stage.interact_pressed();
        stage.interact_released();
        stage.tick(0.0);

        let guide = stage.instance(GUIDE).unwrap();
        assert_eq!(guide.phase(), Phase::Question);
        assert_eq!(guide.visible_text(), "Yes?");

        stage.option_chosen(1);
        let guide = stage.instance(GUIDE).unwrap();
        assert_eq!(guide.position(), Some(Position::START));
        assert!(!guide.finished());
        assert!(guide.proceed());
        assert!(!guide.in_question());

        let kinds: Vec<_> = stage.events().iter().map(|e| &e.kind).collect();
        assert!(kinds.iter().any(|k| matches!(k, StageEventKind::Branched { option: 1, .. })));
        assert_eq!(stage.text().letters(), "HiYes?");
    }

    #[test]
    fn unmatched_option_stays_in_question() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(GUIDE);
        stage.interact_pressed();
        stage.tick(1.0);
        stage.interact_pressed();

        stage.option_chosen(2);
        let guide = stage.instance(GUIDE).unwrap();
        assert_eq!(guide.position(), Some(Position::new(0, 0, 1)));
        assert!(guide.in_question());
    }

    #[test]
    fn focus_locks_on_engaged_instance() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(GUIDE);
        stage.interact_pressed();
        assert_eq!(stage.engaged(), Some(GUIDE));

        stage.overlap_begin(SIGN);
        assert_eq!(stage.focus(), Some(GUIDE));
        stage.interact_pressed();
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Overlapping);
    }

    #[test]
    fn most_recent_overlap_gets_focus() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(SIGN);
        stage.overlap_begin(GUIDE);
        assert_eq!(stage.focus(), Some(GUIDE));

        stage.overlap_end(GUIDE);
        assert_eq!(stage.focus(), Some(SIGN));
    }

    #[test]
    fn nearest_overlap_gets_focus() {
        let mut stage = stage(StageConfig::default().with_focus(FocusPolicy::Nearest));
        stage.overlap_begin(SIGN);
        stage.overlap_begin(GUIDE);
        stage.report_distance(SIGN, 0.5);
        stage.report_distance(GUIDE, 2.0);
        assert_eq!(stage.focus(), Some(SIGN));

        stage.interact_pressed();
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Active);
        assert_eq!(stage.instance(GUIDE).unwrap().phase(), Phase::Overlapping);
    }

    #[test]
    fn exhausted_instance_does_not_shadow_a_live_one() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(CRYSTAL);
        stage.interact_pressed();
        stage.interact_pressed();
        stage.option_chosen(2);
        stage.interact_released();
        stage.overlap_end(CRYSTAL);
        assert!(stage.instance(CRYSTAL).unwrap().finished());

        stage.overlap_begin(SIGN);
        stage.overlap_begin(CRYSTAL);
        assert_eq!(stage.focus(), Some(SIGN));

        stage.interact_pressed();
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Active);
        assert_eq!(stage.instance(CRYSTAL).unwrap().phase(), Phase::Overlapping);
    }

    #[test]
    fn repeat_reset_while_inside_can_start_again() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(SIGN);
        stage.interact_pressed();
        stage.interact_pressed();
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Exit);

        stage.interact_released();
        assert!(stage.is_overlapping(SIGN));
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Overlapping);
        assert_eq!(stage.focus(), Some(SIGN));

        stage.interact_pressed();
        assert_eq!(stage.instance(SIGN).unwrap().phase(), Phase::Active);
        let names = stage
            .text()
            .entries()
            .iter()
            .filter(|e| matches!(e, TranscriptEntry::ItemName(_)))
            .count();
        assert_eq!(names, 2);
    }

    #[test]
    fn exhausted_instance_stays_released_while_inside() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(CRYSTAL);
        stage.interact_pressed();
        stage.interact_pressed();
        stage.option_chosen(1);
        stage.interact_released();

        assert!(stage.is_overlapping(CRYSTAL));
        assert_eq!(stage.instance(CRYSTAL).unwrap().phase(), Phase::NotOverlapping);
        assert_eq!(stage.focus(), None);
    }

    #[test]
    fn save_item_accept_requests_save() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(CRYSTAL);
        stage.interact_pressed();
        stage.interact_released();
        stage.interact_pressed();
        stage.option_chosen(1);
        stage.interact_released();

        let mut events = stage.events().events_for(CRYSTAL);
        assert!(events.any(|e| e.kind == StageEventKind::SaveRequested
            && e.description == "save requested"));
        assert_eq!(stage.instance(CRYSTAL).unwrap().phase(), Phase::NotOverlapping);
        assert_eq!(stage.engaged(), None);
        assert!(stage
            .text()
            .entries()
            .contains(&TranscriptEntry::ItemDescription("Rest here?".into())));
    }

    #[test]
    fn declined_save_requests_nothing() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(CRYSTAL);
        stage.interact_pressed();
        stage.interact_pressed();
        stage.option_chosen(2);

        assert!(!stage
            .events()
            .iter()
            .any(|e| e.kind == StageEventKind::SaveRequested));
    }

    #[test]
    fn unknown_ids_and_stray_input_are_ignored() {
        let mut stage = stage(StageConfig::default());
        stage.overlap_begin(InstanceId(99));
        stage.overlap_end(InstanceId(99));
        stage.report_distance(InstanceId(99), 1.0);
        stage.interact_pressed();
        stage.interact_released();
        stage.option_chosen(1);

        assert!(stage.events().is_empty());
        assert!(stage.text().is_empty());
    }

    #[test]
    fn event_log_is_bounded() {
        let mut stage = stage(StageConfig::default().with_max_events(2));
        stage.overlap_begin(SIGN);
        stage.overlap_end(SIGN);
        stage.overlap_begin(SIGN);
        stage.overlap_end(SIGN);
        assert_eq!(stage.events().len(), 2);
        assert_eq!(stage.events().dropped(), 2);
    }

    #[test]
    fn clock_counts_ticks_and_seconds() {
        let mut stage = stage(StageConfig::default());
        stage.tick(0.25);
        stage.tick(0.25);
        assert_eq!(stage.clock().tick(), 2);
        assert!((stage.clock().elapsed_seconds() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stage_config_reaches_conversations() {
        let library = Library::new()
            .with_script(
                "s",
                DialogueScript::new().with_conversation(ConversationNode::new(0).with_dialogue(
                    DialogueNode::new(0, "A")
                        .with_subtitle(SubtitleNode::new(0, "abc").with_duration(3.0).with_voice("v")),
                )),
            )
            .with_placement(Placement::conversation("a", "s"));
        let config = StageConfig::default()
            .with_dialogue(cq_dialogue::DialogueConfig::default().with_skip_audio(SkipAudio::Once));
        let mut stage = Stage::new(&library, config, Transcript::new(), NullSink).unwrap();

        stage.overlap_begin(InstanceId(0));
        stage.interact_pressed();
        stage.interact_released();
        stage.interact_pressed();
        assert_eq!(stage.audio().audio_count(), 1);
    }

    #[test]
    fn build_from_library_json() {
        let json = serde_json::json!({
            "scripts": {
                "hello": {
                    "conversations": [
                        { "id": 0, "dialogues": [
                            { "id": 0, "speaker": "Bo", "subtitles": [
                                { "id": 0, "text": "Hello there" }
                            ] }
                        ] }
                    ]
                }
            },
            "placements": [
                { "kind": "conversation", "name": "bo", "script": "hello", "allow_repeat": false }
            ]
        });
        let library: Library = serde_json::from_value(json).unwrap();
        let mut stage =
            Stage::new(&library, StageConfig::default(), NullSink, Transcript::new()).unwrap();

        let bo = stage.find("bo").unwrap();
        stage.overlap_begin(bo);
        stage.interact_pressed();
        assert_eq!(stage.instance(bo).unwrap().phase(), Phase::Exit);
        stage.interact_released();

        let bo_state = stage.instance(bo).unwrap();
        assert!(bo_state.finished());
        assert_eq!(bo_state.phase(), Phase::NotOverlapping);
        assert_eq!(stage.text().speakers(), ["Bo"]);
    }
}
