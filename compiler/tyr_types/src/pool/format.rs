//! Type formatting for debugging and error messages.

use std::fmt::Write;

use tyr_ir::StringInterner;

use crate::{Idx, Pool, Tag, VarState};

impl Pool {
    /// Format a type as a human-readable string.
    ///
    /// Variables print as `$<id>`; use [`format_type_named`](Self::format_type_named)
    /// to print their source names instead.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_into(idx, &mut buf, None);
        buf
    }

    /// Format a type, resolving variable and module names through `interner`.
    pub fn format_type_named(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut buf = String::new();
        self.format_into(idx, &mut buf, Some(interner));
        buf
    }

    fn format_into(&self, idx: Idx, buf: &mut String, names: Option<&StringInterner>) {
        match self.tag(idx) {
            // Primitives
            Tag::Int => buf.push_str("int"),
            Tag::Float => buf.push_str("float"),
            Tag::Complex => buf.push_str("complex"),
            Tag::Bool => buf.push_str("bool"),
            Tag::Str => buf.push_str("str"),
            Tag::Bytes => buf.push_str("bytes"),
            Tag::None => buf.push_str("none"),
            Tag::TupleEnd => buf.push_str("()"),

            // Containers
            Tag::List => {
                buf.push('[');
                self.format_into(self.child(idx), buf, names);
                buf.push(']');
            }
            Tag::Set => {
                buf.push('{');
                self.format_into(self.child(idx), buf, names);
                buf.push('}');
            }

            // Tuples
            Tag::Tuple => {
                buf.push('(');
                self.format_chain_into(self.child(idx), buf, names);
                buf.push(')');
            }
            Tag::TupleCons => {
                buf.push('(');
                self.format_chain_into(idx, buf, names);
                buf.push(')');
            }

            // Function
            Tag::Function => {
                buf.push('(');
                for (i, param) in self.function_params(idx).into_iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_into(param, buf, names);
                }
                buf.push_str(") -> ");
                self.format_into(self.function_return(idx), buf, names);
            }

            // Named
            Tag::Module => {
                let name = self.module_name(idx);
                match names {
                    Some(interner) => {
                        let _ = write!(buf, "module {}", interner.lookup(name));
                    }
                    None => {
                        let _ = write!(buf, "module#{}", name.raw());
                    }
                }
            }

            // Variables
            Tag::Var => match self.var_state(self.var_id(idx)) {
                VarState::Link { target } => self.format_into(*target, buf, names),
                VarState::Unbound {
                    name: Some(name), ..
                } if names.is_some() => {
                    let text = names.map(|i| i.lookup(*name)).unwrap_or_default();
                    let _ = write!(buf, "${text}");
                }
                VarState::Unbound { id, .. } => {
                    let _ = write!(buf, "${id}");
                }
                VarState::Overloaded { candidates, .. } => {
                    buf.push_str("overload{");
                    // Joined types are left out
                    for (i, candidate) in candidates.iter().enumerate() {
                        if i > 0 {
                            buf.push_str(" | ");
                        }
                        self.format_into(candidate.ty, buf, names);
                    }
                    buf.push('}');
                }
            },
        }
    }

    /// Format the elements of a cons chain, comma separated. A chain that
    /// ends in an unresolved variable prints its tail as `..tail`.
    fn format_chain_into(&self, chain: Idx, buf: &mut String, names: Option<&StringInterner>) {
        let mut chain = self.resolve_links(chain);
        let mut count = 0;
        loop {
            match self.tag(chain) {
                Tag::TupleEnd => {
                    if count == 1 {
                        buf.push(',');
                    }
                    return;
                }
                Tag::TupleCons => {
                    if count > 0 {
                        buf.push_str(", ");
                    }
                    self.format_into(self.cons_head(chain), buf, names);
                    count += 1;
                    chain = self.resolve_links(self.cons_tail(chain));
                }
                _ => {
                    if count > 0 {
                        buf.push_str(", ");
                    }
                    buf.push_str("..");
                    self.format_into(chain, buf, names);
                    return;
                }
            }
        }
    }
}
