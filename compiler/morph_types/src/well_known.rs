//! Well-known types: the universal root, the enum base, numerics, text,
//! primitives, and the collection capabilities.
//!
//! The table is built once per process. Every accessor hands out a clone
//! of the same handle, so well-known types compare equal across callers.
//!
//! ```text
//! Any
//!  ├── Enum            : Comparable, Serializable
//!  ├── Number          : Serializable
//!  │    └── Int8 .. Float64 : Comparable
//!  ├── Bool, Char      : Serializable, Comparable
//!  └── String          : Serializable, Comparable, Text
//!
//! Iterable ◄── Collection ◄── List, Set        Map
//! ```

use std::sync::LazyLock;

use crate::RawType;

struct WellKnown {
    any: RawType,
    enum_base: RawType,
    number: RawType,

    int8: RawType,
    int16: RawType,
    int32: RawType,
    int64: RawType,
    float32: RawType,
    float64: RawType,
    boolean: RawType,
    character: RawType,
    string: RawType,

    prim_i8: RawType,
    prim_i16: RawType,
    prim_i32: RawType,
    prim_i64: RawType,
    prim_f32: RawType,
    prim_f64: RawType,
    prim_bool: RawType,
    prim_char: RawType,

    comparable: RawType,
    serializable: RawType,
    text: RawType,
    iterable: RawType,
    collection: RawType,
    list: RawType,
    set: RawType,
    map: RawType,
}

impl WellKnown {
    fn new() -> Self {
        let comparable = RawType::interface("Comparable").build();
        let serializable = RawType::interface("Serializable").build();
        let text = RawType::interface("Text").build();
        let iterable = RawType::interface("Iterable").build();
        let collection = RawType::interface("Collection")
            .implements(&iterable)
            .build();
        let list = RawType::interface("List").implements(&collection).build();
        let set = RawType::interface("Set").implements(&collection).build();
        let map = RawType::interface("Map").build();

        let any = RawType::class("Any").build();
        let enum_base = RawType::class("Enum")
            .implements(&comparable)
            .implements(&serializable)
            .build();
        let number = RawType::class("Number")
            .implements(&serializable)
            .build();

        let numeric = |name: &str| {
            RawType::class(name)
                .extends(&number)
                .implements(&comparable)
                .build()
        };
        let int8 = numeric("Int8");
        let int16 = numeric("Int16");
        let int32 = numeric("Int32");
        let int64 = numeric("Int64");
        let float32 = numeric("Float32");
        let float64 = numeric("Float64");

        let boolean = RawType::class("Bool")
            .implements(&serializable)
            .implements(&comparable)
            .build();
        let character = RawType::class("Char")
            .implements(&serializable)
            .implements(&comparable)
            .build();
        let string = RawType::class("String")
            .implements(&serializable)
            .implements(&comparable)
            .implements(&text)
            .build();

        WellKnown {
            prim_i8: RawType::primitive("i8", &int8),
            prim_i16: RawType::primitive("i16", &int16),
            prim_i32: RawType::primitive("i32", &int32),
            prim_i64: RawType::primitive("i64", &int64),
            prim_f32: RawType::primitive("f32", &float32),
            prim_f64: RawType::primitive("f64", &float64),
            prim_bool: RawType::primitive("bool", &boolean),
            prim_char: RawType::primitive("char", &character),
            any,
            enum_base,
            number,
            int8,
            int16,
            int32,
            int64,
            float32,
            float64,
            boolean,
            character,
            string,
            comparable,
            serializable,
            text,
            iterable,
            collection,
            list,
            set,
            map,
        }
    }
}

static WELL_KNOWN: LazyLock<WellKnown> = LazyLock::new(WellKnown::new);

macro_rules! well_known_accessors {
    ($($(#[$doc:meta])* $fn_name:ident => $field:ident;)*) => {
        impl RawType {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $fn_name() -> RawType {
                    WELL_KNOWN.$field.clone()
                }
            )*
        }
    };
}

well_known_accessors! {
    /// The universal root every non-primitive type is assignable to.
    any => any;
    /// The implicit base of every enumeration.
    enum_base => enum_base;
    /// Base class of the boxed numerics.
    number => number;
    int8 => int8;
    int16 => int16;
    int32 => int32;
    int64 => int64;
    float32 => float32;
    float64 => float64;
    boolean => boolean;
    character => character;
    string => string;
    prim_i8 => prim_i8;
    prim_i16 => prim_i16;
    prim_i32 => prim_i32;
    prim_i64 => prim_i64;
    prim_f32 => prim_f32;
    prim_f64 => prim_f64;
    prim_bool => prim_bool;
    prim_char => prim_char;
    comparable => comparable;
    serializable => serializable;
    /// Capability of character sequences.
    text => text;
    iterable => iterable;
    collection => collection;
    list => list;
    set => set;
    map => map;
}
