use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonElement {
    // Constant `button` discriminator required on the wire.
    #[serde(rename = "type")]
    kind: &'static str,
    pub action_id: String,
    pub text: TextObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ButtonElement {
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: "button",
            action_id: action_id.into(),
            text: TextObject::plain(label),
            style: None,
            value: None,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        block_id: String,
        text: TextObject,
    },
    Section {
        block_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        fields: Vec<TextObject>,
    },
    Divider {
        block_id: String,
    },
    Actions {
        block_id: String,
        elements: Vec<ButtonElement>,
    },
    Context {
        block_id: String,
        elements: Vec<TextObject>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub fallback_text: String,
    pub blocks: Vec<Block>,
}

pub struct MessageBuilder {
    fallback_text: String,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self { fallback_text: fallback_text.into(), blocks: Vec::new() }
    }

    pub fn header(mut self, block_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.blocks
            .push(Block::Header { block_id: block_id.into(), text: TextObject::plain(text) });
        self
    }

    pub fn section<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut SectionBuilder),
    {
        let mut builder = SectionBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Section {
            block_id: block_id.into(),
            text: builder.build(),
            fields: Vec::new(),
        });
        self
    }

    pub fn fields<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut FieldsBuilder),
    {
        let mut builder = FieldsBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Section {
            block_id: block_id.into(),
            text: None,
            fields: builder.build(),
        });
        self
    }

    pub fn divider(mut self, block_id: impl Into<String>) -> Self {
        self.blocks.push(Block::Divider { block_id: block_id.into() });
        self
    }

    pub fn actions<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ActionsBuilder),
    {
        let mut builder = ActionsBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Actions { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn context<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ContextBuilder),
    {
        let mut builder = ContextBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Context { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn build(self) -> MessageTemplate {
        MessageTemplate { fallback_text: self.fallback_text, blocks: self.blocks }
    }
}

#[derive(Default)]
pub struct SectionBuilder {
    text: Option<TextObject>,
}

impl SectionBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Option<TextObject> {
        self.text
    }
}

#[derive(Default)]
pub struct FieldsBuilder {
    fields: Vec<TextObject>,
}

impl FieldsBuilder {
    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.fields.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.fields
    }
}

#[derive(Default)]
pub struct ActionsBuilder {
    elements: Vec<ButtonElement>,
}

impl ActionsBuilder {
    pub fn button(&mut self, button: ButtonElement) -> &mut Self {
        self.elements.push(button);
        self
    }

    fn build(self) -> Vec<ButtonElement> {
        self.elements
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    elements: Vec<TextObject>,
}

impl ContextBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, ButtonElement, ButtonStyle, MessageBuilder, TextObject};

    #[test]
    fn message_builder_creates_typed_block_structure() {
        let message = MessageBuilder::new("fallback")
            .header("reminder.header.v1", "Reminder")
            .section("reminder.body.v1", |section| {
                section.mrkdwn("*Time to apply*");
            })
            .actions("reminder.actions.v1", |actions| {
                actions.button(
                    ButtonElement::new("application.applied.v1", "I've Applied!")
                        .style(ButtonStyle::Primary),
                );
            })
            .build();

        assert_eq!(message.blocks.len(), 3);
        assert!(matches!(
            &message.blocks[0],
            Block::Header {
                block_id,
                text: TextObject::Plain { .. }
            } if block_id == "reminder.header.v1"
        ));
        assert!(matches!(
            &message.blocks[2],
            Block::Actions { block_id, elements } if block_id == "reminder.actions.v1" && elements.len() == 1
        ));
    }

    #[test]
    fn button_serializes_with_wire_discriminator() {
        let button = ButtonElement::new("application.applied.v1", "I've Applied!")
            .style(ButtonStyle::Primary);
        let json = serde_json::to_value(&button).expect("serialize button");

        assert_eq!(json["type"], "button");
        assert_eq!(json["action_id"], "application.applied.v1");
        assert_eq!(json["text"]["type"], "plain_text");
        assert_eq!(json["style"], "primary");
        assert!(json.get("value").is_none());
    }

    #[test]
    fn fields_section_omits_empty_text() {
        let message = MessageBuilder::new("fallback")
            .fields("report.summary.v1", |fields| {
                fields.mrkdwn("*Daily Goal:* 60 applications").mrkdwn("*Completion:* 75.0%");
            })
            .build();

        let json = serde_json::to_value(&message.blocks[0]).expect("serialize section");
        assert_eq!(json["type"], "section");
        assert!(json.get("text").is_none());
        assert_eq!(json["fields"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn divider_serializes_bare() {
        let message = MessageBuilder::new("fallback").divider("confirm.divider.v1").build();
        let json = serde_json::to_value(&message.blocks[0]).expect("serialize divider");
        assert_eq!(json["type"], "divider");
    }
}
