#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on correctness of specific declaration forms, on the spans recorded for
/// skipped expressions, and on the parser's error recovery behavior (avoiding cascaded errors).
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<SourceFile, Vec<CompileError>> {
        parse_source(source)
    }

    fn only_class(file: &SourceFile) -> &ClassDecl {
        fn find(items: &[Spanned<Item>]) -> Option<&ClassDecl> {
            items.iter().find_map(|item| match &item.node {
                Item::Class(c) => Some(c),
                Item::Namespace(ns) => find(&ns.items),
                Item::Enum(_) => None,
            })
        }
        find(&file.items).expect("expected a class declaration")
    }

    fn fields(class: &ClassDecl) -> Vec<&FieldDecl> {
        class
            .members
            .iter()
            .filter_map(|m| match &m.node {
                Member::Field(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn properties(class: &ClassDecl) -> Vec<&PropertyDecl> {
        class
            .members
            .iter()
            .filter_map(|m| match &m.node {
                Member::Property(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_class_header() {
        let file = parse_str("public sealed partial class Player : Record, IDisposable { }").unwrap();
        let class = only_class(&file);
        assert_eq!(class.name.node, "Player");
        assert_eq!(class.kind, ClassKind::Class);
        assert!(class.modifiers.has(Modifier::Public));
        assert!(class.modifiers.has(Modifier::Sealed));
        assert!(class.modifiers.has(Modifier::Partial));
        assert_eq!(class.bases.len(), 2);
        assert_eq!(class.bases[0].node.as_simple_identifier(), Some("Record"));
    }

    #[test]
    fn test_parse_namespaces() {
        let source = "using System;\nnamespace A.B { using C.D; class X {} namespace Inner { class Y {} } }";
        let file = parse_str(source).unwrap();
        assert_eq!(file.usings.len(), 1);
        let Item::Namespace(ns) = &file.items[0].node else {
            panic!("expected namespace");
        };
        assert_eq!(ns.name.dotted(), "A.B");
        assert!(!ns.file_scoped);
        assert_eq!(ns.usings[0].node.path.dotted(), "C.D");
        assert_eq!(ns.items.len(), 2);
        assert!(matches!(&ns.items[1].node, Item::Namespace(inner) if inner.name.dotted() == "Inner"));
    }

    #[test]
    fn test_parse_file_scoped_namespace() {
        let file = parse_str("namespace Game.Model;\nusing X;\npublic class A : Data {}\npublic class B : Record {}").unwrap();
        assert_eq!(file.items.len(), 1);
        let Item::Namespace(ns) = &file.items[0].node else {
            panic!("expected namespace");
        };
        assert!(ns.file_scoped);
        assert_eq!(ns.usings.len(), 1);
        assert_eq!(ns.items.len(), 2);
    }

    #[test]
    fn test_parse_using_forms() {
        let file = parse_str(
            "using A.B;\nusing static System.Math;\nusing Map = System.Collections.Generic.Dictionary<int, int>;\nglobal using G;",
        )
        .unwrap();
        let usings: Vec<_> = file.usings.iter().map(|u| &u.node).collect();
        assert_eq!(usings.len(), 4);
        assert!(usings[1].is_static);
        assert_eq!(usings[2].alias.as_deref(), Some("Map"));
        assert_eq!(usings[2].path.dotted(), "System.Collections.Generic.Dictionary");
        assert!(usings[3].is_global);
    }

    #[test]
    fn test_field_initializer_spans() {
        let source = "class C : Record { public int Hp = 10 * (2 + 1), Mp; string Name = \"a; b\"; }";
        let file = parse_str(source).unwrap();
        let class = only_class(&file);
        let fields = fields(class);
        assert_eq!(fields.len(), 2);

        let hp = &fields[0].declarators[0].node;
        assert_eq!(hp.name, "Hp");
        assert_eq!(hp.initializer.and_then(|s| s.slice(source)), Some("10 * (2 + 1)"));

        let mp = &fields[0].declarators[1].node;
        assert_eq!(mp.name, "Mp");
        assert_eq!(mp.initializer, None);

        let name = &fields[1].declarators[0].node;
        assert_eq!(name.initializer.and_then(|s| s.slice(source)), Some("\"a; b\""));
    }

    #[test]
    fn test_generic_initializer_keeps_commas_inside_type_arguments() {
        let source = "class C { Dictionary<int, int> a = new Dictionary<int, int>(), b; }";
        let file = parse_str(source).unwrap();
        let decls = &fields(only_class(&file))[0].declarators;
        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[0].node.initializer.and_then(|s| s.slice(source)),
            Some("new Dictionary<int, int>()")
        );
        assert_eq!(decls[1].node.name, "b");
    }

    #[test]
    fn test_lambda_and_object_initializers() {
        let source = "class C { Func<int, int> F = x => x + 1; Point P = new Point { X = 1, Y = 2 }; }";
        let file = parse_str(source).unwrap();
        let fields = fields(only_class(&file));
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields[1].declarators[0].node.initializer.and_then(|s| s.slice(source)),
            Some("new Point { X = 1, Y = 2 }")
        );
    }

    #[test]
    fn test_parse_properties() {
        let source = r#"
class C : Record {
    public int A { get; set; }
    public int B { get; }
    public int C1 { get; init; } = 5;
    public int D => A + 1;
    public int E { get { return 1; } private set => _e = value; }
}
"#;
        let file = parse_str(source).unwrap();
        let props = properties(only_class(&file));
        assert_eq!(props.len(), 5);

        assert!(props[0].is_auto() && props[0].has_setter());
        assert!(props[1].is_auto() && !props[1].has_setter());
        assert!(props[2].has_setter());
        assert_eq!(props[2].initializer.and_then(|s| s.slice(source)), Some("5"));
        assert_eq!(props[3].expression_body.and_then(|s| s.slice(source)), Some("A + 1"));
        assert!(!props[3].has_setter());
        assert!(!props[4].is_auto());
        assert!(props[4].accessors[1].modifiers.has(Modifier::Private));
    }

    #[test]
    fn test_methods_and_constructors_are_skipped() {
        let source = r#"
class Player : Record {
    public Player() : base() { Hp = 1; }
    static Player() { }
    public void Heal(int amount) { if (amount > 0) { Hp += amount; } }
    public T Get<T>(string key) where T : class, new() => default;
    public abstract int Compute();
    ~Player() { }
    public int Hp;
}
"#;
        let file = parse_str(source).unwrap();
        let class = only_class(&file);
        let kinds: Vec<_> = class
            .members
            .iter()
            .map(|m| match &m.node {
                Member::Constructor(_) => "ctor",
                Member::Method(_) => "method",
                Member::Field(_) => "field",
                Member::Other => "other",
                _ => "?",
            })
            .collect();
        assert_eq!(kinds, vec!["ctor", "ctor", "method", "method", "method", "other", "field"]);
    }

    #[test]
    fn test_unmodelled_members_are_recognised() {
        let source = r#"
class C {
    public event EventHandler Changed;
    public int this[int i] { get => i; }
    public static C operator +(C a, C b) => a;
    public static implicit operator int(C c) { return 0; }
    public delegate void Handler(int x);
    public int After;
}
"#;
        let file = parse_str(source).unwrap();
        let class = only_class(&file);
        let others = class.members.iter().filter(|m| matches!(m.node, Member::Other)).count();
        assert_eq!(others, 5);
        assert_eq!(fields(class).len(), 1);
    }

    #[test]
    fn test_parse_attributes() {
        let source = r#"
[assembly: InternalsVisibleTo("Tests")]
namespace N {
    [Serializable, Obsolete("x", true)]
    class C : Record {
        [K] public int Id;
        [RecGen.X] [field: NonSerialized] public int Cache;
    }
}
"#;
        let file = parse_str(source).unwrap();
        let class = only_class(&file);
        assert_eq!(class.attributes.len(), 2);
        assert!(class.attributes[1].node.args.is_some());

        let fields = fields(class);
        assert_eq!(fields[0].attributes[0].node.name.dotted(), "K");
        assert_eq!(fields[1].attributes.len(), 2);
        assert_eq!(fields[1].attributes[0].node.name.dotted(), "RecGen.X");
        assert_eq!(fields[1].attributes[1].node.target.as_deref(), Some("field"));
    }

    #[test]
    fn test_parse_types() {
        let source = "class C { List<List<int>> A; int[] B; int[,] C2; int? D; global::A.B.Foo E; (int, string name) F; Outer<int>.Inner G; }";
        let file = parse_str(source).unwrap();
        let tys: Vec<String> = fields(only_class(&file)).iter().map(|f| f.ty.node.to_string()).collect();
        assert_eq!(
            tys,
            vec![
                "List<List<int>>",
                "int[]",
                "int[,]",
                "int?",
                "A.B.Foo",
                "(int, string)",
                "Outer.Inner<int>",
            ]
        );
    }

    #[test]
    fn test_parse_enum() {
        let source = "enum Color : byte { Red = 1, Green = Red << 2, [Obsolete] Blue, }";
        let file = parse_str(source).unwrap();
        let Item::Enum(e) = &file.items[0].node else {
            panic!("expected enum");
        };
        assert_eq!(e.name.node, "Color");
        assert!(matches!(e.underlying.as_ref().map(|t| &t.node), Some(TypeRef::Builtin(KeywordId::Byte))));
        let names: Vec<_> = e.variants.iter().map(|v| v.node.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Green", "Blue"]);
        assert_eq!(e.variants[1].node.value.and_then(|s| s.slice(source)), Some("Red << 2"));
    }

    #[test]
    fn test_nested_types() {
        let source = "class Outer { public class Inner : Data { int X; } enum Kind { A } struct S { } }";
        let file = parse_str(source).unwrap();
        let class = only_class(&file);
        assert!(matches!(&class.members[0].node, Member::Class(c) if c.name.node == "Inner"));
        assert!(matches!(&class.members[1].node, Member::Enum(_)));
        assert!(matches!(&class.members[2].node, Member::Class(c) if c.kind == ClassKind::Struct));
    }

    #[test]
    fn test_record_declarations() {
        let file = parse_str("public record Point(int X, int Y); record struct P2 { }").unwrap();
        assert_eq!(file.items.len(), 2);
        assert!(matches!(&file.items[1].node, Item::Class(c) if c.kind == ClassKind::Struct));
    }

    #[test]
    fn test_recovers_from_broken_members() {
        let source = "class C { int = 5; public int Ok; string ; public int AlsoOk; }";
        let errs = parse_str(source).expect_err("broken members must be reported");
        assert_eq!(errs.len(), 2, "one error per broken member, got {errs:?}");
        assert!(errs.iter().all(|e| e.message.contains("Expected identifier")));
    }

    #[test]
    fn test_unexpected_top_level_token_is_single_error() {
        let errs = parse_str("42; class C {}").expect_err("numbers are not declarations");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("Expected type declaration"));
    }

    #[test]
    fn test_missing_semicolon() {
        let errs = parse_str("class C { int X }").expect_err("missing ';'");
        assert!(errs[0].message.contains("Expected ';' after field declaration"));
    }

    #[test]
    fn test_empty_source() {
        let file = parse_str("  // nothing here\n").unwrap();
        assert!(file.items.is_empty());
        assert!(file.usings.is_empty());
    }
}
