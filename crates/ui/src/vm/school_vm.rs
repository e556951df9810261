use csr_core::model::SchoolId;
use csr_core::model::program::{ProgramSchool, School, SchoolStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedSchoolVm {
    pub id: SchoolId,
    pub name: String,
    pub location: String,
    pub status: SchoolStatus,
    pub students: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogueSchoolVm {
    pub id: SchoolId,
    pub name: String,
    pub location: String,
}

fn location(school: &School) -> String {
    format!("{}, {}", school.district, school.state)
}

#[must_use]
pub fn map_assigned_schools(schools: &[ProgramSchool]) -> Vec<AssignedSchoolVm> {
    schools
        .iter()
        .map(|assigned| AssignedSchoolVm {
            id: assigned.school.id.clone(),
            name: assigned.school.name.clone(),
            location: location(&assigned.school),
            status: assigned.status,
            students: assigned.student_count,
        })
        .collect()
}

#[must_use]
pub fn map_catalogue_schools<'a>(
    schools: impl IntoIterator<Item = &'a School>,
) -> Vec<CatalogueSchoolVm> {
    schools
        .into_iter()
        .map(|school| CatalogueSchoolVm {
            id: school.id.clone(),
            name: school.name.clone(),
            location: location(school),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_district_and_state() {
        let school = School {
            id: SchoolId::new("sch-1"),
            name: "GHS Kolar".into(),
            district: "Kolar".into(),
            state: "Karnataka".into(),
            category: "government".into(),
        };
        let rows = map_catalogue_schools([&school]);
        assert_eq!(rows[0].location, "Kolar, Karnataka");
    }
}
