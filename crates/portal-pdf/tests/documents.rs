use pdf_page::read::{content_stream, Xref};
use portal_pdf::{DayRow, Overflow, Report, Timetable};

fn unit_test_report() -> Report {
    Report {
        title: String::from("Unit Test"),
        subtitle: String::from("Notes | Demo"),
        paragraphs: vec![String::from("A short paragraph.")],
        footer: None,
    }
}

fn stream_text(pdf: &[u8]) -> String {
    String::from_utf8_lossy(content_stream(pdf).unwrap()).into_owned()
}

#[test]
fn report_structure() {
    let pdf = unit_test_report().render();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    let text = String::from_utf8_lossy(&pdf);
    assert_eq!(text.matches(" 0 obj").count(), 5);
    assert!(text.contains("/MediaBox [0 0 595 842]"));

    let xref = Xref::parse(&pdf).unwrap();
    assert_eq!(xref.size, 6);
    assert_eq!(xref.root, 1);
    assert_eq!(xref.objects().count(), 5);
    xref.verify(&pdf).unwrap();

    assert!(stream_text(&pdf).contains("(Unit Test) Tj"));
}

fn bca_monday() -> Timetable {
    Timetable {
        branch: String::from("BCA"),
        program: String::from("Bachelor of Computer Applications"),
        semester: String::from("Semester IV"),
        rows: vec![DayRow::new(
            "Monday",
            vec!["DSA", "DBMS", "Math", "RECESS", "OS", "Lab", "Aptitude"],
        )],
        ..Timetable::default()
    }
}

#[test]
fn timetable_structure() {
    let pdf = bca_monday().render();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox [0 0 842 595]"));

    let xref = Xref::parse(&pdf).unwrap();
    xref.verify(&pdf).unwrap();

    let stream = stream_text(&pdf);
    assert!(stream.contains("(Monday) Tj"));
    assert!(stream.contains("(DSA) Tj"));
    assert!(stream.contains("(Aptitude) Tj"));
    assert_eq!(stream.matches(" l S\n").count(), 8);
}

#[test]
fn timetable_reference_bytes() {
    assert_eq!(
        bca_monday().render(),
        include_bytes!("data/bca-monday.pdf").to_vec()
    );
}

#[test]
fn report_spacing_reference_bytes() {
    let mut report = unit_test_report();
    report.paragraphs = vec![
        String::from("Hello.  World, two spaces after a period."),
        String::from("A well-known\tfact."),
    ];
    let pdf = report.render();
    assert!(stream_text(&pdf).contains("(A well-known    fact.) Tj"));
    assert_eq!(pdf, include_bytes!("data/spacing.pdf").to_vec());
}

#[test]
fn escaped_text() {
    let mut report = unit_test_report();
    report.paragraphs = vec![String::from(r"Path C:\temp (draft)")];
    let stream = stream_text(&report.render());
    assert!(stream.contains(r"(Path C:\\temp \(draft\)) Tj"));
}

#[test]
fn lossy_characters() {
    let mut report = unit_test_report();
    report.title = String::from("Café → Ω");
    let pdf = report.render();
    let stream = content_stream(&pdf).unwrap();
    let expected: &[u8] = b"(Caf\xE9 ? ?) Tj";
    assert!(stream.windows(expected.len()).any(|w| w == expected));
    Xref::parse(&pdf).unwrap().verify(&pdf).unwrap();
}

#[test]
fn deterministic() {
    let report = unit_test_report();
    assert_eq!(report.render(), report.render());
    assert_eq!(
        report.render(),
        report.render_checked(Overflow::Error).unwrap()
    );
}

#[test]
fn external_reader() {
    use pdf::{
        backend::Backend,
        file::Storage,
        object::{PlainRef, Resolve},
        primitive::Primitive,
    };

    let data = unit_test_report().render();
    let (xref_tab, _trailer) = data.read_xref_table_and_trailer().expect("xref");
    let storage = Storage::new(data, xref_tab);
    match storage.resolve(PlainRef { id: 4, gen: 0 }).expect("font") {
        Primitive::Dictionary(dict) => match dict.get("BaseFont") {
            Some(Primitive::Name(name)) => assert_eq!(name.as_str(), "Helvetica"),
            other => panic!("unexpected /BaseFont {:?}", other),
        },
        other => panic!("unexpected font {:?}", other),
    }
}
