//! Per-component output buffers.
//!
//! Every component accumulates its text in its own [`WriteBuffer`].
//! Parents collect a child's text through [`SymbolTree::write_return`];
//! a component with a redirect target appends its text to the target's
//! buffer instead and hands its parent an empty string.

use crate::component::ComponentFlags;
use crate::{ComponentId, SymbolTree};

/// Accumulated output fragments and their total length.
#[derive(Clone, Debug, Default)]
pub struct WriteBuffer {
    fragments: Vec<String>,
    len: usize,
}

impl WriteBuffer {
    pub fn push(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.len += fragment.len();
        self.fragments.push(fragment.to_string());
    }

    /// Total length in bytes of all fragments.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Concatenate the fragments.
    pub fn flatten(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for fragment in &self.fragments {
            out.push_str(fragment);
        }
        out
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
        self.len = 0;
    }
}

impl SymbolTree {
    pub fn buffer(&self, id: ComponentId) -> &WriteBuffer {
        &self.get(id).buffer
    }

    /// Append `fragment` to the buffer of `id`.
    pub fn write_to_cont(&mut self, id: ComponentId, fragment: &str) {
        self.get_mut(id).buffer.push(fragment);
    }

    /// End the current output line of `id`.
    ///
    /// Advances the line counter of the enclosing File and stamps the Linear
    /// node of `id` (if any) with the line just ended. Returns that line.
    pub fn write_new_line(&mut self, id: ComponentId) -> u32 {
        self.new_line(id, true)
    }

    /// End a line without stamping any Linear node.
    pub(crate) fn write_line_break(&mut self, id: ComponentId) -> u32 {
        self.new_line(id, false)
    }

    fn new_line(&mut self, id: ComponentId, stamp: bool) -> u32 {
        self.write_to_cont(id, "\n");
        let Some(file) = self.top_file(id) else {
            return 0;
        };
        let Some(data) = self.get_mut(file).file_mut() else {
            return 0;
        };
        let line = data.written_lines;
        data.written_lines += 1;
        let node = self.get(id);
        if stamp && !node.kind.is_file() {
            if let Some(linear) = node.linear {
                self.linears.get_mut(linear).debug_line = Some(line);
            }
        }
        line
    }

    /// Take the text of `id`.
    ///
    /// With a redirect target set the text is appended to the target and
    /// the empty string is returned.
    pub fn write_return(&mut self, id: ComponentId) -> String {
        let text = self.get(id).buffer.flatten();
        match self.get(id).redirect {
            Some(target) => {
                self.write_to_cont(target, &text);
                String::new()
            }
            None => text,
        }
    }

    /// Clear the buffer of `id` and, if it was written, of its subtree.
    ///
    /// A File also restarts its line counter and forgets the include
    /// lines it wrote.
    pub fn write_reset(&mut self, id: ComponentId) {
        let node = self.get_mut(id);
        node.buffer.clear();
        if let Some(data) = node.file_mut() {
            data.written_lines = 1;
            data.included_libraries.clear();
        }
        if !node.flags.contains(ComponentFlags::WRITTEN) {
            return;
        }
        node.flags.remove(ComponentFlags::WRITTEN);
        let children = node.ordered.clone();
        for child in children {
            self.write_reset(child);
        }
    }

    /// Send all future text of `id` to `target`.
    pub fn write_redirect(&mut self, id: ComponentId, target: ComponentId) {
        self.get_mut(id).redirect = Some(target);
    }
}
