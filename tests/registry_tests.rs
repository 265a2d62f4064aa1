use student_records::{
    ConnectionMode, EditForm, Level, Notice, Registry, Student, StudentForm, StudentRepository,
};

mod common;
use common::create_temp_store;

fn form(roll: &str, name: &str, course: &str, gpa: &str) -> StudentForm {
    StudentForm {
        roll_number: roll.to_string(),
        name: name.to_string(),
        course: course.to_string(),
        gpa: gpa.to_string(),
    }
}

fn edit(name: &str, course: &str, gpa: &str) -> EditForm {
    EditForm {
        name: name.to_string(),
        course: course.to_string(),
        gpa: gpa.to_string(),
    }
}

#[test]
fn test_add_flow() {
    let (storage, _dir) = create_temp_store(ConnectionMode::PerOperation);
    let registry = Registry::new(&storage);

    assert_eq!(
        registry.add(form("R1", "Alice", "CS", "3.5")),
        Notice::success("Student added successfully!")
    );
    assert_eq!(
        registry.add(form("R1", "Bob", "EE", "2.0")),
        Notice::danger("A student with this roll number already exists")
    );
    assert_eq!(
        registry.add(form("R2", "Bob", "EE", "abc")),
        Notice::danger("GPA must be a number")
    );
    assert_eq!(
        registry.add(form("R2", "Bob", "EE", "4.5")),
        Notice::danger("GPA must be between 0 and 4.0")
    );

    assert_eq!(registry.list(), vec![Student::new("R1", "Alice", "CS", 3.5)]);
}

#[test]
fn test_search_flow() {
    let (storage, _dir) = create_temp_store(ConnectionMode::PerOperation);
    let registry = Registry::new(&storage);
    registry.add(form("R1", "Alice", "CS", "3.5"));

    assert_eq!(
        registry.search("R1"),
        Ok(Student::new("R1", "Alice", "CS", 3.5))
    );
    let missing = registry.search("R9").unwrap_err();
    assert_eq!(missing.level, Level::Warning);
    assert_eq!(missing.message, "No student found with that roll number");
}

#[test]
fn test_edit_flow() {
    let (storage, _dir) = create_temp_store(ConnectionMode::PerOperation);
    let registry = Registry::new(&storage);
    registry.add(form("R1", "Alice", "CS", "3.5"));

    assert_eq!(
        registry.edit("R9", edit("X", "Y", "1.0")),
        Notice::danger("Student not found")
    );
    assert_eq!(
        registry.edit("R1", edit("Alice", "CS", "-1")),
        Notice::danger("GPA must be between 0 and 4.0")
    );
    assert_eq!(registry.search("R1").map(|s| s.gpa), Ok(3.5));

    let notice = registry.edit("R1", edit("Alice Smith", "Math", "3.8"));
    assert!(notice.is_success());
    assert_eq!(notice.message, "Student information updated successfully!");
    assert_eq!(
        registry.search("R1"),
        Ok(Student::new("R1", "Alice Smith", "Math", 3.8))
    );
}

#[test]
fn test_delete_flow() {
    let (storage, _dir) = create_temp_store(ConnectionMode::Pooled { max_size: 2 });
    let registry = Registry::new(&storage);
    registry.add(form("R1", "Alice", "CS", "3.5"));

    assert_eq!(
        registry.delete("R1"),
        Notice::success("Student deleted successfully!")
    );
    assert_eq!(registry.delete("R1"), Notice::danger("Student not found"));
    assert!(StudentRepository::new(&storage).list_all().is_empty());
}
