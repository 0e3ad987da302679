// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guidance_desk_domain::{College, CounselorProfile};

/// Picks a counselor for a new appointment request.
///
/// The rule is first-match, deliberately simple: the first counselor in
/// directory order whose college equals the student's college; if none
/// matches, the first counselor in directory order; if the directory is
/// empty, no assignment.
///
/// # Arguments
///
/// * `directory` - The counselor directory, in directory order
/// * `student_college` - The student's college at submission time
///
/// # Returns
///
/// The assigned counselor's user id, or `None` if the directory is empty.
#[must_use]
pub fn auto_assign_counselor(
    directory: &[CounselorProfile],
    student_college: Option<&College>,
) -> Option<i64> {
    let by_college = student_college.and_then(|college| {
        directory
            .iter()
            .find(|c| c.college.as_ref() == Some(college))
    });

    by_college
        .or_else(|| directory.first())
        .map(|c| c.user_id)
}
