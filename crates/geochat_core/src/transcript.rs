pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
}

/// Append-only chat log. Removal exists only for transient placeholders and
/// always goes by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) -> MessageId {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(Message {
            id,
            role,
            text: text.into(),
        });
        id
    }

    /// Removes the message with `id`; returns whether it was present.
    pub fn remove(&mut self, id: MessageId) -> bool {
        match self.messages.iter().position(|message| message.id == id) {
            Some(index) => {
                self.messages.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
