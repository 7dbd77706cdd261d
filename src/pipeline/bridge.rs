//! Event bridge - native DOM events into output streams.
//!
//! One listener per (node, event kind). The listener forwards every event it
//! sees into a single-producer stream; the returned cleanup removes the
//! listener and closes the stream, after which subscribers receive nothing.

use std::rc::Rc;

use crate::dom::Document;
use crate::stream::{Stream, channel};
use crate::types::{Cleanup, DomEvent, NodeId};

/// Bridge `kind` events on `node` into a new stream.
pub fn event_stream(document: &Document, node: NodeId, kind: &str) -> (Stream<DomEvent>, Cleanup) {
    let (sink, stream) = channel::<DomEvent>();
    let sink = Rc::new(sink);

    let forward = Rc::clone(&sink);
    let listener = document.add_event_listener(node, kind, move |event| {
        log::trace!("emit {} from {} (seq {})", event.kind, event.current_target, event.seq);
        forward.push(event.clone());
    });

    let document = document.clone();
    let cleanup: Cleanup = Box::new(move || {
        document.remove_event_listener(listener);
        sink.close();
    });
    (stream, cleanup)
}
