use thin_vec::ThinVec;

use crate::{ClassId, ty::TypeDescriptor};

/// A resolved annotation together with its arguments, in declaration order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Annotation {
    pub class_id: ClassId,
    pub args: ThinVec<AnnotationArg>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AnnotationArg {
    /// `Foo::class`
    ClassLiteral(TypeDescriptor),
    /// `[A::class, B::class]`
    ArrayLiteral(ThinVec<AnnotationArg>),
    /// The arguments bound to a vararg parameter
    Vararg(ThinVec<AnnotationArg>),
    /// `*array`
    Spread(Box<AnnotationArg>),
    /// Any other constant, not interesting to the serialization plugin
    Constant,
}

impl Annotation {
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            args: ThinVec::new(),
        }
    }

    pub fn with_arg(mut self, arg: AnnotationArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Class literals of the first argument, with array literals, vararg lists and
    /// spread arguments flattened into one sequence.
    ///
    /// Argument forms that are not class literals are skipped.
    pub fn class_literals(&self) -> Vec<&TypeDescriptor> {
        let mut output = vec![];
        if let Some(first) = self.args.first() {
            match first {
                AnnotationArg::ArrayLiteral(elements) | AnnotationArg::Vararg(elements) => {
                    for element in elements {
                        collect_element(element, &mut output);
                    }
                }
                // a single class literal outside of a vararg list
                AnnotationArg::ClassLiteral(ty) => output.push(ty),
                AnnotationArg::Spread(_) | AnnotationArg::Constant => {}
            }
        }
        output
    }

    /// The first class literal argument, e.g. `S` in `@Serializable(with = S::class)`
    pub fn first_class_literal(&self) -> Option<&TypeDescriptor> {
        self.args.iter().find_map(|arg| match arg {
            AnnotationArg::ClassLiteral(ty) => Some(ty),
            _ => None,
        })
    }
}

fn collect_element<'a>(arg: &'a AnnotationArg, output: &mut Vec<&'a TypeDescriptor>) {
    match arg {
        AnnotationArg::ClassLiteral(ty) => output.push(ty),
        AnnotationArg::Spread(inner) => match inner.as_ref() {
            AnnotationArg::ArrayLiteral(elements) | AnnotationArg::Vararg(elements) => {
                output.extend(elements.iter().filter_map(|element| match element {
                    AnnotationArg::ClassLiteral(ty) => Some(ty),
                    _ => None,
                }));
            }
            _ => {}
        },
        _ => {}
    }
}
