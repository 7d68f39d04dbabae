use std::{
    fmt::{Debug, Display},
    hash::Hash,
    io::{self, Write},
};

use itertools::Itertools;
use once_cell::sync::Lazy;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

use crate::{
    color::{Register, RegisterAssignment},
    graph::InterferenceGraph,
};

/// Graphviz color names used for registers 1, 2, 3, ... in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
enum Palette {
    LightBlue,
    Salmon,
    PaleGreen,
    Gold,
    Plum,
    LightGray,
    Orange,
    Cyan,
    Pink,
    Khaki,
    Turquoise,
    Tan,
}

static PALETTE: Lazy<Vec<Palette>> = Lazy::new(|| Palette::iter().collect());

fn fill(register: Register) -> Palette {
    let index = (register.max(1) - 1) as usize % PALETTE.len();
    PALETTE[index]
}

fn quote<T: Display>(label: &T) -> String {
    let label = label.to_string();
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Writes `graph` as an undirected Graphviz graph, filling each vertex with a
/// color picked by its register. Vertices without a register are left blank.
pub fn write<T, W>(
    graph: &InterferenceGraph<T>,
    assignment: &RegisterAssignment<T>,
    mut w: W,
) -> io::Result<()>
where
    T: Hash + Eq + Clone + Ord + Debug + Display,
    W: Write,
{
    writeln!(w, "graph interference {{")?;
    writeln!(w, "  node [style=filled];")?;

    for vertex in graph.vertices().sorted() {
        match assignment.get(vertex) {
            Some(&register) => writeln!(
                w,
                "  {} [label={}, fillcolor={}];",
                quote(vertex),
                quote(&format!("{} (r{})", vertex, register)),
                fill(register)
            )?,
            None => writeln!(w, "  {} [fillcolor=white];", quote(vertex))?,
        }
    }

    let edges = graph
        .edges()
        .into_iter()
        .map(|(v, u)| if v <= u { (v, u) } else { (u, v) })
        .sorted();
    for (v, u) in edges {
        writeln!(w, "  {} -- {};", quote(v), quote(u))?;
    }

    writeln!(w, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        graph: &InterferenceGraph<String>,
        assignment: &RegisterAssignment<String>,
    ) -> String {
        let mut out = Vec::new();
        write(graph, assignment, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn path() -> InterferenceGraph<String> {
        let mut graph: InterferenceGraph<String> =
            ["b", "a", "c"].iter().map(|v| v.to_string()).collect();
        graph.add_edge(&"b".to_string(), &"a".to_string()).unwrap();
        graph.add_edge(&"c".to_string(), &"b".to_string()).unwrap();
        graph
    }

    #[test]
    fn test_palette_names() {
        assert_eq!(Palette::LightBlue.to_string(), "lightblue");
        assert_eq!(fill(1), Palette::LightBlue);
        assert_eq!(fill(2), Palette::Salmon);
        assert_eq!(fill(PALETTE.len() as Register + 1), Palette::LightBlue);
    }

    #[test]
    fn test_write_colored() {
        let assignment = RegisterAssignment::from([
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 1),
        ]);

        let expected = "graph interference {
  node [style=filled];
  \"a\" [label=\"a (r1)\", fillcolor=lightblue];
  \"b\" [label=\"b (r2)\", fillcolor=salmon];
  \"c\" [label=\"c (r1)\", fillcolor=lightblue];
  \"a\" -- \"b\";
  \"b\" -- \"c\";
}
";
        assert_eq!(render(&path(), &assignment), expected);
    }

    #[test]
    fn test_write_uncolored() {
        let out = render(&path(), &RegisterAssignment::new());

        assert!(out.contains("  \"a\" [fillcolor=white];\n"));
        assert!(out.contains("  \"b\" -- \"c\";\n"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(&"say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
    }
}
