use crate::types::{Author, NormalizedPost, PlanetError, RenderView, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const GENERATOR: &str = concat!("planet-aggregator ", env!("CARGO_PKG_VERSION"));

/// Channel-level fields that are not part of the view.
#[derive(Debug, Clone, Default)]
pub struct ChannelInfo {
    pub description: String,
    pub link: String,
    pub author: Author,
}

/// Serializes a [`RenderView`] as an RSS 2.0 document.
pub struct RssWriter {
    channel: ChannelInfo,
}

impl RssWriter {
    pub fn new(channel: ChannelInfo) -> Self {
        Self { channel }
    }

    /// Write the document. `generated_at` becomes the channel's pubDate.
    pub fn write(&self, view: &RenderView, generated_at: DateTime<Utc>) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("rss").with_attributes([("version", "2.0")])),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("channel")))?;

        text_element(&mut writer, "title", &view.title)?;
        text_element(&mut writer, "link", &self.channel.link)?;
        text_element(&mut writer, "description", &self.channel.description)?;
        if let Some(editor) = format_author(&self.channel.author) {
            text_element(&mut writer, "managingEditor", &editor)?;
        }
        text_element(&mut writer, "pubDate", &generated_at.to_rfc2822())?;
        text_element(&mut writer, "generator", GENERATOR)?;

        for post in &view.posts {
            write_item(&mut writer, post)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("channel")))?;
        emit(&mut writer, Event::End(BytesEnd::new("rss")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| PlanetError::Rss(e.to_string()))
    }
}

fn write_item(writer: &mut Writer<Vec<u8>>, post: &NormalizedPost) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", &post.title)?;
    text_element(writer, "link", &post.link)?;
    text_element(
        writer,
        "description",
        post.description.as_deref().unwrap_or(&post.content),
    )?;
    if let Some(author) = format_author(&post.author) {
        text_element(writer, "author", &author)?;
    }
    if !post.link.is_empty() {
        emit(
            writer,
            Event::Start(BytesStart::new("guid").with_attributes([("isPermaLink", "true")])),
        )?;
        emit(writer, Event::Text(BytesText::new(&post.link)))?;
        emit(writer, Event::End(BytesEnd::new("guid")))?;
    }
    if !post.feed.link.is_empty() {
        emit(
            writer,
            Event::Start(
                BytesStart::new("source").with_attributes([("url", post.feed.link.as_str())]),
            ),
        )?;
        emit(writer, Event::Text(BytesText::new(&post.feed.title)))?;
        emit(writer, Event::End(BytesEnd::new("source")))?;
    }
    text_element(writer, "pubDate", &post.effective_timestamp.to_rfc2822())?;

    emit(writer, Event::End(BytesEnd::new("item")))
}

/// RSS wants `email (name)`; fall back to whichever part exists.
fn format_author(author: &Author) -> Option<String> {
    match (author.email.is_empty(), author.name.is_empty()) {
        (true, true) => None,
        (false, false) => Some(format!("{} ({})", author.email, author.name)),
        (false, true) => Some(author.email.clone()),
        (true, false) => Some(author.name.clone()),
    }
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| PlanetError::Rss(e.to_string()))
}
