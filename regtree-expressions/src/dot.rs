use crate::Expression;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Expression {
    /// Writes the tree as a graphviz digraph. Literals are drawn as boxes.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;
        let mut next_id = 0;
        self.output_dot_node(w, &mut next_id)?;
        writeln!(w, "}}")?;

        Ok(())
    }

    /// Like [`output_dot`](Expression::output_dot), to a newly created file.
    pub fn render_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut w = File::create(path)?;
        self.output_dot(&mut w)
    }

    fn output_dot_node(&self, w: &mut impl Write, next_id: &mut usize) -> io::Result<usize> {
        let id = *next_id;
        *next_id += 1;

        let (label, attrs) = match self {
            Expression::CharMatch(c) => (format!("{c:?}"), ", shape=box"),
            Expression::Concat(_, _) => ("concat".to_string(), ""),
            Expression::Alternation(_, _) => ("|".to_string(), ""),
            Expression::Repetition(_) => ("*".to_string(), ""),
        };
        writeln!(w, "node[label=\"{}\"{attrs}] id{id}", escape(&label))?;

        for child in self.children() {
            let child_id = child.output_dot_node(w, next_id)?;
            writeln!(w, "id{id} -> id{child_id}")?;
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::Expression;

    fn render(e: &Expression) -> String {
        let mut out = Vec::new();
        e.output_dot(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn dot_tree() {
        let e = Expression::repetition(Expression::alternation('a', Expression::word("bc").unwrap()));
        let dot = render(&e);

        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("node[label=\"*\"] id0"));
        assert!(dot.contains("node[label=\"'a'\", shape=box] id2"));
        assert!(dot.contains("id0 -> id1"));
        assert_eq!(dot.matches(" -> ").count(), e.size() - 1);
    }

    #[test]
    fn dot_escapes_labels() {
        let dot = render(&Expression::literal('"'));
        assert!(dot.contains(r#"node[label="'\"'", shape=box] id0"#));
    }
}
