use serde::{Deserialize, Serialize};

use crate::node::{ConversationNode, DialogueNode, Position, QuestionNode, SubtitleNode};

/// The authored data behind one conversation-capable interactable.
///
/// Holds the ordered conversation roots and the flat list of question
/// branches that cross-reference them by index. Every lookup is bounds
/// checked and returns `None` for positions outside the tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueScript {
    /// Conversation roots, addressed by index.
    #[serde(default)]
    pub conversations: Vec<ConversationNode>,
    /// Question branches in authoring order.
    #[serde(default)]
    pub questions: Vec<QuestionNode>,
}

impl DialogueScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conversation root.
    pub fn with_conversation(mut self, conversation: ConversationNode) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// Append a question branch.
    pub fn with_question(mut self, question: QuestionNode) -> Self {
        self.questions.push(question);
        self
    }

    /// Look up a conversation by index.
    pub fn conversation(&self, index: usize) -> Option<&ConversationNode> {
        self.conversations.get(index)
    }

    /// Look up the dialogue at `position` (the subtitle index is ignored).
    pub fn dialogue(&self, position: Position) -> Option<&DialogueNode> {
        self.conversation(position.conversation)?
            .dialogues
            .get(position.dialogue)
    }

    /// Look up the subtitle at `position`.
    pub fn subtitle(&self, position: Position) -> Option<&SubtitleNode> {
        self.dialogue(position)?.subtitles.get(position.subtitle)
    }

    /// Whether `position` addresses an existing subtitle.
    pub fn contains(&self, position: Position) -> bool {
        self.subtitle(position).is_some()
    }

    /// Number of dialogues in a conversation (0 if it does not exist).
    pub fn dialogue_count(&self, conversation: usize) -> usize {
        self.conversation(conversation)
            .map_or(0, |c| c.dialogues.len())
    }

    /// Number of subtitles in a dialogue (0 if it does not exist).
    pub fn subtitle_count(&self, conversation: usize, dialogue: usize) -> usize {
        self.dialogue(Position::new(conversation, dialogue, 0))
            .map_or(0, |d| d.subtitles.len())
    }

    /// Questions offered at `position`, in authoring order.
    pub fn questions_at(&self, position: Position) -> impl Iterator<Item = &QuestionNode> + '_ {
        self.questions
            .iter()
            .filter(move |q| q.is_offered_at(position))
    }

    /// Total number of subtitles across all conversations.
    pub fn line_count(&self) -> usize {
        self.conversations
            .iter()
            .flat_map(|c| &c.dialogues)
            .map(|d| d.subtitles.len())
            .sum()
    }

    /// Iterate every subtitle with its position, in traversal order.
    pub fn lines(&self) -> impl Iterator<Item = (Position, &DialogueNode, &SubtitleNode)> + '_ {
        self.conversations
            .iter()
            .enumerate()
            .flat_map(|(ci, conversation)| {
                conversation
                    .dialogues
                    .iter()
                    .enumerate()
                    .flat_map(move |(di, dialogue)| {
                        dialogue
                            .subtitles
                            .iter()
                            .enumerate()
                            .map(move |(si, sub)| (Position::new(ci, di, si), dialogue, sub))
                    })
            })
    }
}
