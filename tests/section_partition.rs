// Integration tests for section splitting and entity segmentation.

use arealift::area::sections::{split_entities, split_rooms, split_sections};

mod common;
use common::{mud_school, to_lines};

/// Every line the splitter keeps must come from the original file, in file
/// order, and no line may land in two sections.
#[test]
fn section_bodies_form_a_subsequence_of_the_file() {
    let file = to_lines(&mud_school());
    let sections = split_sections(&file);

    let sentinels = [
        "#ROOMS",
        "#MOBILES",
        "#OBJECTS",
        "#SHOPS",
        "#RESETS",
        "#SPECIALS",
    ];
    let mut concatenated: Vec<&String> = Vec::new();
    for body in [
        &sections.mobiles,
        &sections.objects,
        &sections.rooms,
        &sections.shops,
        &sections.resets,
        &sections.specials,
    ] {
        concatenated.extend(body.iter().filter(|l| !sentinels.contains(&l.as_str())));
    }

    // Subsequence walk: each kept line is found at or after the previous
    // one's position in the original file.
    let mut pos = 0usize;
    for line in &concatenated {
        let found = file[pos..].iter().position(|l| l == *line);
        assert!(
            found.is_some(),
            "line {:?} not found in file order after index {}",
            line,
            pos
        );
        pos += found.unwrap() + 1;
    }
}

#[test]
fn out_of_section_lines_are_discarded() {
    let file = to_lines(&mud_school());
    let sections = split_sections(&file);

    let header = "{ 5 35 } Merc    The Mud School~".to_string();
    for body in [
        &sections.rooms,
        &sections.mobiles,
        &sections.objects,
        &sections.shops,
        &sections.resets,
        &sections.specials,
    ] {
        assert!(!body.contains(&header));
        assert!(!body.iter().any(|l| l == "#0"));
    }
}

/// N entities in a VNUM-delimited section produce exactly N groups, each
/// opening with its own `#<vnum>` header, and concatenating the groups
/// gives back the section body (sentinel removed).
#[test]
fn entity_segmentation_round_trips() {
    let body = to_lines(
        "#MOBILES\n#100\na\nb\n#200\nc\n#300\nd\ne\nf",
    );
    let groups = split_entities(&body);

    assert_eq!(groups.len(), 3);
    for (group, vnum) in groups.iter().zip(["#100", "#200", "#300"]) {
        assert_eq!(group[0], vnum);
    }

    let rebuilt: Vec<String> = groups.into_iter().flatten().collect();
    assert_eq!(rebuilt, body[1..].to_vec());
}

#[test]
fn room_groups_close_at_the_s_terminator() {
    let file = to_lines(&mud_school());
    let sections = split_sections(&file);
    let groups = split_rooms(&sections.rooms);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0][0], "#100");
    assert_eq!(groups[1][0], "#200");
    for group in &groups {
        assert_eq!(group.last().map(|l| l.as_str()), Some("S"));
    }
}

#[test]
fn empty_resets_and_specials_survive_the_sentinel_drop() {
    let sections = split_sections(&to_lines("#RESETS\n#0\n#SPECIALS\n#0"));
    assert!(sections.resets.is_empty());
    assert!(sections.specials.is_empty());
}
