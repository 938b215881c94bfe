//! Shared fixtures for the area-file integration tests.
//!
//! `mud_school()` is a small but complete area file exercising every
//! section kind, including the forward exit (room 100 points at room 200,
//! defined later) and the dangling exit (room 200 points at the
//! nonexistent 999) the resolver has to handle.

/// Split fixture text the same way `Area::load` does: one trimmed
/// string per line.
pub fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim().to_string()).collect()
}

#[allow(dead_code)] // Not every test binary reads the whole fixture.
pub fn mud_school() -> String {
    r#"#AREA
{ 5 35 } Merc    The Mud School~

#MOBILES
#3000
wizard mage~
the wizard~
A wizard walks around behind the counter.
~
The wizard looks old and senile.
~
64 0 -200
20 15 4d8+40 human 1 12000 8 8 0
#0

#OBJECTS
#3050
sword long~
a long sword~
A long sword lies here.~
~
5 0 1
1 8 0
E
sword~
It has seen better days.~
#0

#ROOMS
#100
Entrance Hall~
You stand at the entrance to the school.
~
0 ABC 0
D0
You see the training hall.~
door gate~
1 -1 200
S
#200
Training Hall~
Dusty mats cover the floor.
~
0 0 1
D2
A broken arch leads nowhere.~
~
0 -1 999
S
#0

#SHOPS
3000 2 3 4 10 0 105 15 0 23 * the wizard
0

#RESETS
M 0 3000 1 100 *wizard
O 0 3050 100 *sword
#0

#SPECIALS
M 3000 spec_cast_mage * the wizard
#0
"#
    .to_string()
}
