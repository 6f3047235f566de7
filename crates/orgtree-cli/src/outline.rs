//! Plain-text outline of a chart for terminal output.

use std::fmt::Write as _;

use orgtree_core::OrgNode;

pub fn render(tree: &OrgNode) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{}", label(tree));
  write_children(&mut out, &tree.children, "");
  out
}

fn label(node: &OrgNode) -> String {
  let mut s = format!("{} ({}) [{}]", node.name, node.position, node.id);
  for contact in [&node.email, &node.phone] {
    if !contact.is_empty() {
      s.push_str("  ");
      s.push_str(contact);
    }
  }
  s
}

fn write_children(out: &mut String, children: &[OrgNode], prefix: &str) {
  for (i, child) in children.iter().enumerate() {
    let last = i + 1 == children.len();
    let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
    let _ = writeln!(out, "{prefix}{branch}{}", label(child));
    write_children(out, &child.children, &format!("{prefix}{indent}"));
  }
}
